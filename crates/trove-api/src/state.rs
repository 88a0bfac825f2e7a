use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use trove_db::Database;
use trove_mail::Mailer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    /// Emails allowed to read the admin contact-request view.
    pub admin_emails: Vec<String>,
    /// Directory uploaded images are written to; served at /uploads.
    pub upload_dir: PathBuf,
    /// None when SMTP is not configured — contact sends then fail.
    pub mailer: Option<Mailer>,
    pub started: Instant,
}

impl AppStateInner {
    pub fn is_admin(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|a| a.eq_ignore_ascii_case(email))
    }
}
