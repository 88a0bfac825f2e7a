//! SMTP delivery for contact-request notifications.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`MailConfig::from_env`] returns `None` and no mailer should be
//! constructed — callers treat an absent mailer as a delivery failure.

pub mod mailer;
pub mod messages;

pub use mailer::{MailConfig, MailError, Mailer};
