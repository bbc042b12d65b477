//! Domain primitives and the complaint store.
//!
//! Purpose: define the complaint aggregate, its satellite types, and the
//! in-memory store that owns every instance. Everything here is transport
//! agnostic; the HTTP adapter depends on this module and never the other way
//! around. Serialisation contracts (serde) are documented on each type.

pub mod complaint;
pub mod error;
pub mod store;

pub use self::complaint::{
    Comment, CommentDraft, Complaint, ComplaintDraft, ComplaintStats, ParseStatusError, Status,
};
pub use self::error::{Error, ErrorCode};
pub use self::store::{ComplaintStore, LikeToggle, StoreError};
