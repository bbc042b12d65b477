//! Request middleware.
//!
//! Purpose: request lifecycle concerns that apply to every endpoint. The
//! only component today is the trace-id transform.

pub mod trace;

pub use trace::Trace;
