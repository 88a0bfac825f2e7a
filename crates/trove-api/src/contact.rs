use axum::{extract::State, response::IntoResponse, Json};
use tracing::{error, info, warn};
use uuid::Uuid;

use trove_db::models::ContactRequestRow;
use trove_mail::messages;
use trove_types::api::{
    ContactMessageRequest, ContactMessageResponse, ContactRequestRecord, PendingContactResponse,
};
use trove_types::models::{ContactStatus, PostStatus};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, AuthClaims};
use crate::state::AppState;

/// Admin view cap: the 50 most recent pending requests.
const PENDING_LIMIT: u32 = 50;

/// POST /api/contact — look up the post, resolve its owner, log the
/// request, then send the owner notification. The owner send blocks the
/// response and its failure is the caller's failure; the sender
/// confirmation is detached and only ever logged.
pub async fn send_contact_message(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ContactMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let (post_id, sender_name, sender_email, message) = match (
        req.post_id.filter(|s| !s.trim().is_empty()),
        req.name.filter(|s| !s.trim().is_empty()),
        req.email.filter(|s| !s.trim().is_empty()),
        req.message.filter(|s| !s.trim().is_empty()),
    ) {
        (Some(p), Some(n), Some(e), Some(m)) => (p, n, e, m),
        _ => {
            return Err(ApiError::Validation(
                "postId, name, email, and message are required".into(),
            ))
        }
    };
    let sender_phone = req.phone.filter(|s| !s.trim().is_empty());

    // Find the post and its owner
    let post = state
        .db
        .get_post(&post_id)?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;

    let owner = state
        .db
        .get_user_by_id(&post.owner_id)?
        .filter(|u| !u.email.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("post owner email not available".into()))?;

    // Log the request before attempting delivery; the row transitions
    // to sent or failed on the outcome of the blocking owner send.
    let request_id = Uuid::new_v4().to_string();
    let record = ContactRequestRow {
        id: request_id.clone(),
        post_id: post.id.clone(),
        post_title: post.title.clone(),
        owner_email: owner.email.clone(),
        owner_name: owner.name.clone(),
        sender_name: sender_name.clone(),
        sender_email: sender_email.clone(),
        sender_phone: sender_phone.clone(),
        message: message.clone(),
        status: ContactStatus::Pending.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    state.db.insert_contact_request(&record)?;

    let Some(mailer) = &state.mailer else {
        mark_request(&state, &request_id, ContactStatus::Failed);
        return Err(ApiError::Delivery("mail gateway is not configured".into()));
    };

    let post_status = post.status.parse::<PostStatus>().unwrap_or(PostStatus::Lost);
    let owner_result = mailer
        .send(
            &owner.email,
            &messages::owner_subject(&post.title),
            &messages::owner_body(
                &owner.name,
                post_status,
                &message,
                &sender_name,
                &sender_email,
                sender_phone.as_deref(),
            ),
        )
        .await;

    if let Err(e) = owner_result {
        mark_request(&state, &request_id, ContactStatus::Failed);
        return Err(ApiError::Delivery(e.to_string()));
    }

    mark_request(&state, &request_id, ContactStatus::Sent);
    info!(post_id = %post.id, to = %owner.email, "Owner notification sent");

    // Confirmation to the sender: detached, never blocks or fails the
    // response.
    let task_state = state.clone();
    let post_title = post.title.clone();
    let owner_name = owner.name.clone();
    tokio::spawn(async move {
        let Some(mailer) = &task_state.mailer else {
            return;
        };
        let result = mailer
            .send(
                &sender_email,
                &messages::confirmation_subject(&post_title),
                &messages::confirmation_body(&sender_name, &owner_name, &message),
            )
            .await;
        match result {
            Ok(()) => info!(to = %sender_email, "Confirmation email sent"),
            Err(e) => warn!(to = %sender_email, error = %e, "Failed to send confirmation email"),
        }
    });

    Ok(Json(ContactMessageResponse {
        message: "Contact request sent successfully".into(),
        post_title: post.title,
        owner_email: owner.email,
    }))
}

/// GET /api/contact/admin/pending — requests whose owner notification
/// never resolved. Gated to the configured admin emails.
pub async fn pending_contact_requests(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> ApiResult<impl IntoResponse> {
    if !state.is_admin(&claims.email) {
        return Err(ApiError::Forbidden("admin access required".into()));
    }

    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_pending_contact_requests(PENDING_LIMIT))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::anyhow!("pending listing task failed")
        })??;

    let requests: Vec<ContactRequestRecord> = rows.into_iter().map(to_record).collect();
    let count = requests.len();

    Ok(Json(PendingContactResponse {
        message: "Pending contact requests retrieved".into(),
        requests,
        count,
    }))
}

/// Best-effort status transition; a failure here must not mask the
/// outcome already decided for the caller.
fn mark_request(state: &AppState, request_id: &str, status: ContactStatus) {
    if let Err(e) = state.db.set_contact_request_status(request_id, status.as_str()) {
        error!(request_id, %status, error = %e, "Failed to update contact request status");
    }
}

fn to_record(row: ContactRequestRow) -> ContactRequestRecord {
    ContactRequestRecord {
        id: row.id.parse().unwrap_or_else(|e| {
            warn!("Corrupt contact request id '{}': {}", row.id, e);
            Uuid::default()
        }),
        post_id: row.post_id.parse().unwrap_or_else(|e| {
            warn!("Corrupt post_id '{}' on contact request '{}': {}", row.post_id, row.id, e);
            Uuid::default()
        }),
        post_title: row.post_title,
        owner_email: row.owner_email,
        owner_name: row.owner_name,
        sender_name: row.sender_name,
        sender_email: row.sender_email,
        sender_phone: row.sender_phone,
        message: row.message,
        status: row.status.parse().unwrap_or_else(|e| {
            warn!("Corrupt status on contact request '{}': {}", row.id, e);
            ContactStatus::Pending
        }),
        created_at: crate::posts::parse_timestamp(&row.created_at, &row.id),
    }
}
