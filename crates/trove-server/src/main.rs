use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use trove_api::router;
use trove_api::state::{AppState, AppStateInner};
use trove_mail::{MailConfig, Mailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trove=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("TROVE_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("TROVE_DB_PATH").unwrap_or_else(|_| "trove.db".into());
    let upload_dir = std::env::var("TROVE_UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());
    let admin_emails: Vec<String> = std::env::var("TROVE_ADMIN_EMAILS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let host = std::env::var("TROVE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("TROVE_PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()?;

    // Init database
    let db = trove_db::Database::open(&PathBuf::from(&db_path))?;

    // Mail gateway is optional in dev; contact sends fail without it.
    let mailer = match MailConfig::from_env() {
        Some(config) => Some(Mailer::new(&config)?),
        None => {
            warn!("SMTP_HOST not set; contact emails will not be delivered");
            None
        }
    };

    if admin_emails.is_empty() {
        warn!("TROVE_ADMIN_EMAILS not set; admin endpoints will reject everyone");
    }

    let upload_dir = PathBuf::from(upload_dir);
    tokio::fs::create_dir_all(&upload_dir).await?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret,
        admin_emails,
        upload_dir,
        mailer,
        started: Instant::now(),
    });

    let app = router::build(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Trove server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
