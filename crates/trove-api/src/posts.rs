use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{error, warn};
use uuid::Uuid;

use trove_db::models::{PostFilter, PostRow};
use trove_types::api::{
    DeletePostResponse, OwnerInfo, PostListResponse, PostResponse, UpdatePostRequest,
};
use trove_types::models::PostStatus;

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiMultipart, ApiQuery, AuthClaims};
use crate::state::AppState;
use crate::upload;

#[derive(Debug, Deserialize)]
pub struct PostQuery {
    pub title: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl PostQuery {
    fn filter(&self) -> PostFilter {
        PostFilter {
            title: self.title.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
            location: self.location.clone(),
        }
    }
}

/// GET /api/post — public listing with composable filters, newest first.
/// Owners are projected to name and email only.
pub async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PostQuery>,
) -> ApiResult<impl IntoResponse> {
    let response = list_page(state, query, None).await?;
    Ok(Json(response))
}

/// GET /api/post/user — same filters, implicitly scoped to the caller.
pub async fn list_user_posts(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    ApiQuery(query): ApiQuery<PostQuery>,
) -> ApiResult<impl IntoResponse> {
    let response = list_page(state, query, Some(claims.sub.to_string())).await?;
    Ok(Json(response))
}

async fn list_page(
    state: AppState,
    query: PostQuery,
    owner_id: Option<String>,
) -> ApiResult<PostListResponse> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);
    let offset = (page - 1).saturating_mul(limit);
    let filter = query.filter();
    let project_owner = owner_id.is_none();

    // Run blocking DB queries off the async runtime
    let db = state.clone();
    let (rows, total) = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        let rows = db.db.list_posts(&filter, owner_id.as_deref(), limit, offset)?;
        let total = db.db.count_posts(&filter, owner_id.as_deref())?;
        Ok((rows, total))
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        anyhow::anyhow!("listing task failed")
    })??;

    let posts = rows
        .into_iter()
        .map(|row| {
            let owner = project_owner.then(|| OwnerInfo {
                name: row.owner_name,
                email: row.owner_email,
            });
            to_response(row.post, owner)
        })
        .collect();

    Ok(PostListResponse {
        posts,
        page,
        total_pages: (total.div_ceil(limit as u64)) as u32,
        total_posts: total,
    })
}

/// POST /api/post — multipart form: title, category, location,
/// status (lost|found), optional description and image.
pub async fn create_post(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    ApiMultipart(mut multipart): ApiMultipart,
) -> ApiResult<impl IntoResponse> {
    let mut title = None;
    let mut description = None;
    let mut category = None;
    let mut location = None;
    let mut status = None;
    let mut image_path = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => title = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "category" => category = Some(read_text(field).await?),
            "location" => location = Some(read_text(field).await?),
            "status" => status = Some(read_text(field).await?),
            "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(|m| m.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Upload(e.to_string()))?;

                // A file input submitted without a selection arrives as
                // an empty unnamed part; treat it as no image.
                if filename.is_empty() && data.is_empty() {
                    continue;
                }

                let ext = upload::validate_image(&filename, content_type.as_deref(), data.len())?;
                let stored = upload::storage_filename(&ext);

                tokio::fs::create_dir_all(&state.upload_dir)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to create upload dir: {e}"))?;
                tokio::fs::write(state.upload_dir.join(&stored), &data)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to store upload: {e}"))?;

                image_path = Some(format!("uploads/{stored}"));
            }
            _ => {}
        }
    }

    let (title, category, location, status) = match (
        title.filter(|s: &String| !s.trim().is_empty()),
        category.filter(|s: &String| !s.trim().is_empty()),
        location.filter(|s: &String| !s.trim().is_empty()),
        status,
    ) {
        (Some(t), Some(c), Some(l), Some(s)) => (t, c, l, s),
        _ => {
            return Err(ApiError::Validation(
                "title, category, location, and status are required".into(),
            ))
        }
    };

    // New posts cannot start out returned.
    match status.parse::<PostStatus>() {
        Ok(PostStatus::Lost) | Ok(PostStatus::Found) => {}
        _ => return Err(ApiError::Validation("status must be lost or found".into())),
    }

    let now = chrono::Utc::now().to_rfc3339();
    let post = PostRow {
        id: Uuid::new_v4().to_string(),
        title,
        description: description.filter(|s| !s.is_empty()),
        category,
        location,
        image_path,
        status,
        owner_id: claims.sub.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };

    state.db.insert_post(&post)?;

    Ok((StatusCode::CREATED, Json(to_response(post, None))))
}

/// PUT /api/post/{id}/edit — owner-only partial update. Absent fields
/// stay untouched; status may move to any of lost/found/returned.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthClaims(claims): AuthClaims,
    ApiJson(patch): ApiJson<UpdatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut post = state
        .db
        .get_post(&id)?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;

    if post.owner_id != claims.sub.to_string() {
        return Err(ApiError::Forbidden("cannot edit others' posts".into()));
    }

    if let Some(status) = &patch.status {
        status
            .parse::<PostStatus>()
            .map_err(|_| ApiError::Validation("invalid status value".into()))?;
        post.status = status.clone();
    }
    if let Some(title) = patch.title {
        post.title = title;
    }
    if let Some(description) = patch.description {
        post.description = Some(description);
    }
    if let Some(category) = patch.category {
        post.category = category;
    }
    if let Some(location) = patch.location {
        post.location = location;
    }
    post.updated_at = chrono::Utc::now().to_rfc3339();

    state.db.update_post(&post)?;

    Ok(Json(to_response(post, None)))
}

/// DELETE /api/post/{id} — owner-only, permanent.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthClaims(claims): AuthClaims,
) -> ApiResult<impl IntoResponse> {
    let post = state
        .db
        .get_post(&id)?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;

    if post.owner_id != claims.sub.to_string() {
        return Err(ApiError::Forbidden("cannot delete others' posts".into()));
    }

    state.db.delete_post(&id)?;

    Ok(Json(DeletePostResponse {
        message: "Post deleted successfully".into(),
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))
}

fn to_response(row: PostRow, owner: Option<OwnerInfo>) -> PostResponse {
    PostResponse {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt post id '{}': {}", row.id, e);
            Uuid::default()
        }),
        title: row.title,
        description: row.description,
        category: row.category,
        location: row.location,
        image_path: row.image_path,
        status: row.status.parse().unwrap_or_else(|e| {
            warn!("Corrupt status on post '{}': {}", row.id, e);
            PostStatus::Lost
        }),
        owner_id: row.owner_id.parse().unwrap_or_else(|e| {
            warn!("Corrupt owner_id '{}' on post '{}': {}", row.owner_id, row.id, e);
            Uuid::default()
        }),
        owner,
        created_at: parse_timestamp(&row.created_at, &row.id),
        updated_at: parse_timestamp(&row.updated_at, &row.id),
    }
}

pub(crate) fn parse_timestamp(raw: &str, context: &str) -> chrono::DateTime<chrono::Utc> {
    raw.parse::<chrono::DateTime<chrono::Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') format has no timezone marker.
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on '{}': {}", raw, context, e);
            chrono::DateTime::default()
        })
}
