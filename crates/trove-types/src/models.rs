use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of a listing. New posts start as `lost` or `found`; only an
/// update may move a post to `returned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Lost,
    Found,
    Returned,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Lost => "lost",
            PostStatus::Found => "found",
            PostStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(PostStatus::Lost),
            "found" => Ok(PostStatus::Found),
            "returned" => Ok(PostStatus::Returned),
            other => Err(format!("invalid post status: {other}")),
        }
    }
}

/// Delivery state of a logged contact request. Rows are written `pending`
/// before the owner email is attempted and transitioned to `sent` or
/// `failed` based on the outcome of that blocking send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Sent,
    Failed,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Sent => "sent",
            ContactStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContactStatus::Pending),
            "sent" => Ok(ContactStatus::Sent),
            "failed" => Ok(ContactStatus::Failed),
            other => Err(format!("invalid contact status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_status_round_trips_through_str() {
        for s in ["lost", "found", "returned"] {
            assert_eq!(s.parse::<PostStatus>().unwrap().as_str(), s);
        }
        assert!("stolen".parse::<PostStatus>().is_err());
    }

    #[test]
    fn contact_status_round_trips_through_str() {
        for s in ["pending", "sent", "failed"] {
            assert_eq!(s.parse::<ContactStatus>().unwrap().as_str(), s);
        }
        assert!("queued".parse::<ContactStatus>().is_err());
    }

    #[test]
    fn post_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Returned).unwrap(),
            "\"returned\""
        );
    }
}
