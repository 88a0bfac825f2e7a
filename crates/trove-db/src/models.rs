/// Database row types — these map directly to SQLite rows.
/// Distinct from trove-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub location: String,
    pub image_path: Option<String>,
    pub status: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A post joined with its owner's public contact fields, as returned by
/// the public listing.
#[derive(Debug, Clone)]
pub struct PostWithOwnerRow {
    pub post: PostRow,
    pub owner_name: String,
    pub owner_email: String,
}

#[derive(Debug, Clone)]
pub struct ContactRequestRow {
    pub id: String,
    pub post_id: String,
    pub post_title: String,
    pub owner_email: String,
    pub owner_name: String,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

/// Optional, independently composable listing filters. `title` and
/// `location` match as case-insensitive substrings; `category` and
/// `status` match exactly.
#[derive(Debug, Default, Clone)]
pub struct PostFilter {
    pub title: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
}
