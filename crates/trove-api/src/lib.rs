pub mod auth;
pub mod contact;
pub mod error;
pub mod extract;
pub mod health;
pub mod posts;
pub mod router;
pub mod state;
pub mod upload;
