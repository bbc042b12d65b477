//! Complaint aggregate and its satellite types.
//!
//! A [`Complaint`] exclusively owns its comments and its like bookkeeping;
//! both live and die with the parent. Instances are only ever minted by the
//! store (see [`crate::domain::store`]), which assigns identifiers and
//! timestamps — callers hand over a [`ComplaintDraft`] and get the stored
//! value back.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name recorded for submissions and comments that withhold one.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Fallback name for a non-anonymous submission with a blank name field.
pub const DEFAULT_STUDENT_NAME: &str = "Student";

/// Administrative handling state of a complaint.
///
/// Serialises as the bare variant token (`"Pending"`, `"InProgress"`,
/// `"Resolved"`). The state machine is fully connected: any status may be
/// overwritten with any other, including itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Status {
    /// Submitted and awaiting administrative review.
    Pending,
    /// An administrator is working on it.
    InProgress,
    /// Handled; kept for the record.
    Resolved,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    /// The serialised token for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognised status token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised status `{0}`; expected Pending, InProgress or Resolved")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "InProgress" => Ok(Self::InProgress),
            "Resolved" => Ok(Self::Resolved),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

/// A student-submitted issue report.
///
/// `liked_by` is deliberately absent from the serialised form: it holds
/// stable session identifiers, and exposing those to every client would let
/// one visitor correlate another's activity. The detail endpoint projects a
/// per-viewer `viewerHasLiked` flag instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    /// Store-assigned identifier, strictly increasing from 1.
    #[schema(example = 1)]
    pub id: u64,
    /// Short summary of the issue.
    #[schema(example = "Broken light in corridor")]
    pub title: String,
    /// Category name; matched case-insensitively by the filter operations.
    /// Membership in the deployment's category list is not enforced here.
    #[schema(example = "Electrical")]
    pub category: String,
    /// Full description of the issue.
    pub description: String,
    /// Display name recorded at submission time (already anonymised or
    /// defaulted by the adapter).
    #[schema(example = "Ada")]
    pub student_name: String,
    /// Whether the submitter asked for anonymity. Recorded independently of
    /// the name actually stored.
    pub is_anonymous: bool,
    /// Current handling state. New complaints start [`Status::Pending`].
    pub status: Status,
    /// Stamped once by the store at creation; never mutated afterwards.
    pub submitted_at: DateTime<Utc>,
    /// Non-negative like counter.
    pub likes_count: u32,
    /// Session ids that currently like this complaint. Only the toggle
    /// operation consults it.
    #[serde(skip)]
    pub(crate) liked_by: BTreeSet<String>,
    /// Comments in insertion order, append-only.
    pub comments: Vec<Comment>,
}

/// Caller-supplied fields for a new complaint.
///
/// The store trusts these values: required-ness, length limits, and the
/// anonymity naming rules are the submitting adapter's responsibility.
#[derive(Debug, Clone)]
pub struct ComplaintDraft {
    /// Short summary of the issue.
    pub title: String,
    /// Category name.
    pub category: String,
    /// Full description.
    pub description: String,
    /// Final display name, already resolved via [`resolve_student_name`].
    pub student_name: String,
    /// Whether anonymity was requested.
    pub is_anonymous: bool,
}

/// A comment attached to a complaint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Store-assigned identifier, strictly increasing from 1 and independent
    /// of the complaint id sequence.
    #[schema(example = 1)]
    pub id: u64,
    /// Identifier of the owning complaint; always live at creation time.
    pub complaint_id: u64,
    /// Comment body.
    pub text: String,
    /// Display name recorded at posting time.
    #[schema(example = "Anonymous")]
    pub user_name: String,
    /// Stamped once by the store at creation.
    pub posted_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new comment. Validation happens upstream,
/// same as for [`ComplaintDraft`].
#[derive(Debug, Clone)]
pub struct CommentDraft {
    /// Comment body.
    pub text: String,
    /// Final display name, already resolved via [`resolve_commenter_name`].
    pub user_name: String,
}

/// Aggregate counters over the whole store, for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintStats {
    /// Number of complaints in the store.
    pub total_complaints: usize,
    /// Complaints currently [`Status::Pending`].
    pub pending_complaints: usize,
    /// Complaints currently [`Status::InProgress`].
    pub in_progress_complaints: usize,
    /// Complaints currently [`Status::Resolved`].
    pub resolved_complaints: usize,
    /// Sum of every complaint's like counter.
    pub total_likes: u64,
    /// Sum of every complaint's comment count.
    pub total_comments: usize,
}

/// Apply the submission naming rules.
///
/// Anonymity wins over any provided name; a blank or missing name on a
/// non-anonymous submission falls back to [`DEFAULT_STUDENT_NAME`].
///
/// # Examples
/// ```
/// use backend::domain::complaint::resolve_student_name;
///
/// assert_eq!(resolve_student_name(true, Some("Ada")), "Anonymous");
/// assert_eq!(resolve_student_name(false, Some("Ada")), "Ada");
/// assert_eq!(resolve_student_name(false, Some("   ")), "Student");
/// assert_eq!(resolve_student_name(false, None), "Student");
/// ```
pub fn resolve_student_name(is_anonymous: bool, provided: Option<&str>) -> String {
    if is_anonymous {
        return ANONYMOUS_NAME.to_owned();
    }
    match provided.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => DEFAULT_STUDENT_NAME.to_owned(),
    }
}

/// Apply the comment naming rule: blank or missing becomes
/// [`ANONYMOUS_NAME`].
pub fn resolve_commenter_name(provided: Option<&str>) -> String {
    match provided.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => ANONYMOUS_NAME.to_owned(),
    }
}
