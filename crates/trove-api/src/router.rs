use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::{auth, contact, health, posts};

/// Multipart bodies carry a 5 MB image plus form fields.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/post", get(posts::list_posts).post(posts::create_post))
        .route("/api/post/user", get(posts::list_user_posts))
        .route("/api/post/{id}/edit", put(posts::update_post))
        .route("/api/post/{id}", delete(posts::delete_post))
        .route("/api/contact", post(contact::send_contact_message))
        .route(
            "/api/contact/admin/pending",
            get(contact::pending_contact_requests),
        )
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
