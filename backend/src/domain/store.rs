//! In-memory complaint store.
//!
//! Single authority over every [`Complaint`] in the process: it assigns
//! identifiers from two independent monotonic sequences (complaints and
//! comments), stamps submission timestamps, and enforces the handful of
//! invariants the data model has. State is never persisted; a restart starts
//! empty.
//!
//! The store is an explicitly constructed instance, shared via `Arc` by the
//! composition root — not a process-global. A `Mutex` guards the whole
//! read-modify-write of every operation, which is what makes the counters and
//! like bookkeeping safe under actix-web's multi-threaded runtime. Reads hand
//! out clones, so no caller ever holds a reference into the guarded state
//! across a request boundary.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::complaint::{Comment, CommentDraft, Complaint, ComplaintDraft, ComplaintStats, Status};

/// Failures reported by store operations that reference an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The referenced complaint does not exist.
    #[error("complaint {id} not found")]
    ComplaintNotFound {
        /// Identifier the caller supplied.
        id: u64,
    },
}

/// Outcome of [`ComplaintStore::toggle_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// Whether the user likes the complaint after the toggle.
    pub liked: bool,
    /// Like count after the toggle.
    pub likes_count: u32,
}

#[derive(Debug, Default)]
struct StoreInner {
    complaints: Vec<Complaint>,
    /// Last complaint id handed out; the sequence starts at 1.
    next_complaint_id: u64,
    /// Last comment id handed out; independent of the complaint sequence.
    next_comment_id: u64,
}

impl StoreInner {
    fn find_mut(&mut self, id: u64) -> Result<&mut Complaint, StoreError> {
        self.complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::ComplaintNotFound { id })
    }
}

/// Process-wide in-memory collection of complaints.
///
/// # Examples
/// ```
/// use backend::domain::ComplaintStore;
///
/// let store = ComplaintStore::new();
/// assert!(store.list_all().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ComplaintStore {
    inner: Mutex<StoreInner>,
}

impl ComplaintStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The guarded state stays structurally valid across unwinds, so a
    /// poisoned lock is absorbed rather than turned into a refusal of all
    /// further requests.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All complaints, newest first.
    ///
    /// Ordering is `submitted_at` descending with ties broken by `id`
    /// descending, so equal timestamps list deterministically.
    pub fn list_all(&self) -> Vec<Complaint> {
        newest_first(self.lock().complaints.clone())
    }

    /// The complaint with the given id, if any. No side effects.
    pub fn complaint(&self, id: u64) -> Option<Complaint> {
        self.lock().complaints.iter().find(|c| c.id == id).cloned()
    }

    /// Store a new complaint and return it.
    ///
    /// The store assigns the next id, stamps `submitted_at`, and starts the
    /// complaint [`Status::Pending`] with no likes and no comments — whatever
    /// the caller may have had in mind for those fields is ignored by
    /// construction, since the draft cannot carry them.
    pub fn create(&self, draft: ComplaintDraft) -> Complaint {
        let mut inner = self.lock();
        inner.next_complaint_id += 1;
        let complaint = Complaint {
            id: inner.next_complaint_id,
            title: draft.title,
            category: draft.category,
            description: draft.description,
            student_name: draft.student_name,
            is_anonymous: draft.is_anonymous,
            status: Status::Pending,
            submitted_at: Utc::now(),
            likes_count: 0,
            liked_by: BTreeSet::new(),
            comments: Vec::new(),
        };
        inner.complaints.push(complaint.clone());
        complaint
    }

    /// Unconditionally add one like, ignoring caller identity.
    ///
    /// This is the cumulative counting strategy: N calls yield a count of N
    /// no matter who calls. It never consults or updates the per-user like
    /// set, and is kept strictly separate from [`Self::toggle_like`].
    pub fn increment_like_count(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let complaint = inner.find_mut(id)?;
        complaint.likes_count += 1;
        Ok(())
    }

    /// Toggle the like for one user: like if they have not liked this
    /// complaint, unlike if they have.
    ///
    /// A decrement only ever follows that same user's earlier increment, so
    /// the counter cannot go negative through this path.
    pub fn toggle_like(&self, id: u64, user_id: &str) -> Result<LikeToggle, StoreError> {
        let mut inner = self.lock();
        let complaint = inner.find_mut(id)?;
        let liked = if complaint.liked_by.remove(user_id) {
            complaint.likes_count -= 1;
            false
        } else {
            complaint.liked_by.insert(user_id.to_owned());
            complaint.likes_count += 1;
            true
        };
        Ok(LikeToggle {
            liked,
            likes_count: complaint.likes_count,
        })
    }

    /// Whether the user currently likes the complaint.
    ///
    /// An unknown complaint id answers `false` rather than failing; callers
    /// that care about existence check it separately.
    pub fn has_user_liked(&self, id: u64, user_id: &str) -> bool {
        self.lock()
            .complaints
            .iter()
            .find(|c| c.id == id)
            .is_some_and(|c| c.liked_by.contains(user_id))
    }

    /// Overwrite the status. Any status may replace any other; there is no
    /// enforced ordering and no terminal state.
    pub fn update_status(&self, id: u64, status: Status) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.find_mut(id)?.status = status;
        Ok(())
    }

    /// Append a comment to an existing complaint and return the stored value.
    ///
    /// Existence is checked before an id is drawn, so a failed attach never
    /// consumes a comment id.
    pub fn add_comment(&self, complaint_id: u64, draft: CommentDraft) -> Result<Comment, StoreError> {
        let mut inner = self.lock();
        if !inner.complaints.iter().any(|c| c.id == complaint_id) {
            return Err(StoreError::ComplaintNotFound { id: complaint_id });
        }
        inner.next_comment_id += 1;
        let comment = Comment {
            id: inner.next_comment_id,
            complaint_id,
            text: draft.text,
            user_name: draft.user_name,
            posted_at: Utc::now(),
        };
        inner.find_mut(complaint_id)?.comments.push(comment.clone());
        Ok(comment)
    }

    /// Complaints in the given category, newest first. The match is
    /// case-insensitive and exact; the store does not know the valid
    /// category list.
    pub fn filter_by_category(&self, category: &str) -> Vec<Complaint> {
        newest_first(
            self.lock()
                .complaints
                .iter()
                .filter(|c| c.category.eq_ignore_ascii_case(category))
                .cloned()
                .collect(),
        )
    }

    /// Complaints with the given status, newest first.
    pub fn filter_by_status(&self, status: Status) -> Vec<Complaint> {
        newest_first(
            self.lock()
                .complaints
                .iter()
                .filter(|c| c.status == status)
                .cloned()
                .collect(),
        )
    }

    /// Aggregate counters over the whole store. Pure read, `O(n)`.
    pub fn stats(&self) -> ComplaintStats {
        let inner = self.lock();
        let with_status =
            |status: Status| inner.complaints.iter().filter(|c| c.status == status).count();
        ComplaintStats {
            total_complaints: inner.complaints.len(),
            pending_complaints: with_status(Status::Pending),
            in_progress_complaints: with_status(Status::InProgress),
            resolved_complaints: with_status(Status::Resolved),
            total_likes: inner
                .complaints
                .iter()
                .map(|c| u64::from(c.likes_count))
                .sum(),
            total_comments: inner.complaints.iter().map(|c| c.comments.len()).sum(),
        }
    }
}

fn newest_first(mut complaints: Vec<Complaint>) -> Vec<Complaint> {
    complaints.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    complaints
}
