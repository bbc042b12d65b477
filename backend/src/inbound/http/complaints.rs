//! Complaint API handlers.
//!
//! ```text
//! GET  /api/v1/complaints?category=Electrical
//! POST /api/v1/complaints {"title":"...","category":"...","description":"..."}
//! POST /api/v1/complaints/1/like
//! POST /api/v1/complaints/1/comments {"text":"..."}
//! ```
//!
//! Validation happens here, at the edge; the store is only ever handed
//! well-formed drafts.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::complaint::{resolve_commenter_name, resolve_student_name};
use crate::domain::{Comment, CommentDraft, Complaint, ComplaintDraft, Error, StoreError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    COMMENT_MAX_CHARS, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, parse_status, required_text,
};

/// Optional filters for the complaint listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListFilter {
    /// Keep only complaints in this category (case-insensitive exact match).
    pub category: Option<String>,
    /// Keep only complaints with this status token.
    pub status: Option<String>,
}

/// Submission body for `POST /api/v1/complaints`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaintRequest {
    /// Short summary, at most 100 characters.
    pub title: String,
    /// Category name; free-form here, the published list is advisory.
    pub category: String,
    /// Full description, at most 1000 characters.
    pub description: String,
    /// Submitter's name. Ignored when `isAnonymous` is set; a blank value
    /// falls back to "Student".
    #[serde(default)]
    pub student_name: Option<String>,
    /// Publish the complaint without a name.
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Complaint detail together with the viewer's like state.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDetail {
    /// The complaint, comments included.
    pub complaint: Complaint,
    /// Whether the current session has liked this complaint.
    pub viewer_has_liked: bool,
}

/// Response body for the like toggle.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    /// Whether the viewer likes the complaint after the toggle.
    pub liked: bool,
    /// Like count after the toggle.
    pub likes_count: u32,
}

/// Body for `POST /api/v1/complaints/{id}/comments`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentRequest {
    /// Comment body, at most 500 characters.
    pub text: String,
    /// Commenter's name; blank or missing becomes "Anonymous".
    #[serde(default)]
    pub user_name: Option<String>,
}

/// List complaints, newest first, optionally filtered.
///
/// A category filter wins over a status filter when both are supplied,
/// matching the original behaviour of the listing page.
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    params(ListFilter),
    responses(
        (status = 200, description = "Complaints, newest first", body = [Complaint]),
        (status = 400, description = "Unparseable status filter", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints",
    security([])
)]
#[get("/complaints")]
pub async fn list_complaints(
    state: web::Data<HttpState>,
    filter: web::Query<ListFilter>,
) -> ApiResult<web::Json<Vec<Complaint>>> {
    let filter = filter.into_inner();
    let category = filter.category.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let status = filter.status.as_deref().map(str::trim).filter(|v| !v.is_empty());

    let complaints = if let Some(category) = category {
        state.store.filter_by_category(category)
    } else if let Some(status) = status {
        state.store.filter_by_status(parse_status("status", status)?)
    } else {
        state.store.list_all()
    };
    Ok(web::Json(complaints))
}

/// Fetch one complaint with its comments and the viewer's like state.
#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}",
    params(("id" = u64, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Complaint detail", body = ComplaintDetail),
        (status = 404, description = "No such complaint", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "getComplaint",
    security([])
)]
#[get("/complaints/{id}")]
pub async fn get_complaint(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<ComplaintDetail>> {
    let id = path.into_inner();
    let complaint = state
        .store
        .complaint(id)
        .ok_or(StoreError::ComplaintNotFound { id })?;
    let viewer_has_liked = state.store.has_user_liked(id, &session.user_id()?);
    Ok(web::Json(ComplaintDetail {
        complaint,
        viewer_has_liked,
    }))
}

/// Submit a new complaint.
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    request_body = NewComplaintRequest,
    responses(
        (status = 201, description = "Complaint stored", body = Complaint),
        (status = 400, description = "Validation failure", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "createComplaint",
    security([])
)]
#[post("/complaints")]
pub async fn create_complaint(
    state: web::Data<HttpState>,
    payload: web::Json<NewComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let title = required_text("title", &payload.title, Some(TITLE_MAX_CHARS))?;
    let category = required_text("category", &payload.category, None)?;
    let description = required_text(
        "description",
        &payload.description,
        Some(DESCRIPTION_MAX_CHARS),
    )?;
    let student_name = resolve_student_name(payload.is_anonymous, payload.student_name.as_deref());

    let complaint = state.store.create(ComplaintDraft {
        title,
        category,
        description,
        student_name,
        is_anonymous: payload.is_anonymous,
    });
    Ok(HttpResponse::Created().json(complaint))
}

/// Toggle the viewer's like on a complaint.
///
/// Likes are per session: liking twice takes the like back. The identity
/// used is the opaque visitor id the session carries, so the count can only
/// move by one per visitor.
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/like",
    params(("id" = u64, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "Like toggled", body = LikeResponse),
        (status = 404, description = "No such complaint", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "toggleLike",
    security([])
)]
#[post("/complaints/{id}/like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<LikeResponse>> {
    let user_id = session.user_id()?;
    let outcome = state.store.toggle_like(path.into_inner(), &user_id)?;
    Ok(web::Json(LikeResponse {
        liked: outcome.liked,
        likes_count: outcome.likes_count,
    }))
}

/// Attach a comment to a complaint.
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/comments",
    params(("id" = u64, Path, description = "Complaint id")),
    request_body = NewCommentRequest,
    responses(
        (status = 201, description = "Comment stored", body = Comment),
        (status = 400, description = "Validation failure", body = Error),
        (status = 404, description = "No such complaint", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "addComment",
    security([])
)]
#[post("/complaints/{id}/comments")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<NewCommentRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let text = required_text("text", &payload.text, Some(COMMENT_MAX_CHARS))?;
    let user_name = resolve_commenter_name(payload.user_name.as_deref());

    let comment = state
        .store
        .add_comment(path.into_inner(), CommentDraft { text, user_name })?;
    Ok(HttpResponse::Created().json(comment))
}

/// The deployment's complaint categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Valid category names", body = [String])
    ),
    tags = ["complaints"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<String>>> {
    Ok(web::Json(state.categories.to_vec()))
}
