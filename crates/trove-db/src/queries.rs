use crate::models::{ContactRequestRow, PostFilter, PostRow, PostWithOwnerRow, UserRow};
use crate::Database;
use anyhow::Result;
use rusqlite::{OptionalExtension, Row};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
        created_at: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, email, password, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, name, email, password_hash, created_at),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, email, password, created_at FROM users WHERE email = ?1",
                [email],
                map_user_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, email, password, created_at FROM users WHERE id = ?1",
                [id],
                map_user_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    // -- Posts --

    pub fn insert_post(&self, post: &PostRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (id, title, description, category, location, image_path, status, owner_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    post.id,
                    post.title,
                    post.description,
                    post.category,
                    post.location,
                    post.image_path,
                    post.status,
                    post.owner_id,
                    post.created_at,
                    post.updated_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_post(&self, id: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, title, description, category, location, image_path, status, owner_id, created_at, updated_at
                 FROM posts WHERE id = ?1",
                [id],
                map_post_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Newest-first page of posts matching the filter, each joined with
    /// its owner's name and email. `owner_id` scopes the listing to a
    /// single owner when present.
    pub fn list_posts(
        &self,
        filter: &PostFilter,
        owner_id: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PostWithOwnerRow>> {
        self.with_conn(|conn| {
            let (where_sql, params) = filter_clause(filter, owner_id);
            let sql = format!(
                "SELECT p.id, p.title, p.description, p.category, p.location, p.image_path,
                        p.status, p.owner_id, p.created_at, p.updated_at, u.name, u.email
                 FROM posts p
                 JOIN users u ON u.id = p.owner_id
                 {where_sql}
                 ORDER BY p.created_at DESC, p.id DESC
                 LIMIT {limit} OFFSET {offset}"
            );

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                    Ok(PostWithOwnerRow {
                        post: map_post_row(row)?,
                        owner_name: row.get(10)?,
                        owner_email: row.get(11)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn count_posts(&self, filter: &PostFilter, owner_id: Option<&str>) -> Result<u64> {
        self.with_conn(|conn| {
            let (where_sql, params) = filter_clause(filter, owner_id);
            let sql = format!("SELECT COUNT(*) FROM posts p {where_sql}");
            let count: u64 = conn.query_row(
                &sql,
                rusqlite::params_from_iter(params.iter()),
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }

    /// Persist the mutable fields of an already-fetched post. The caller
    /// applies the patch and stamps `updated_at` first.
    pub fn update_post(&self, post: &PostRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE posts
                 SET title = ?1, description = ?2, category = ?3, location = ?4, status = ?5, updated_at = ?6
                 WHERE id = ?7",
                rusqlite::params![
                    post.title,
                    post.description,
                    post.category,
                    post.location,
                    post.status,
                    post.updated_at,
                    post.id,
                ],
            )?;
            Ok(())
        })
    }

    /// Returns true if a row was deleted.
    pub fn delete_post(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            Ok(n > 0)
        })
    }

    // -- Contact requests --

    pub fn insert_contact_request(&self, req: &ContactRequestRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO contact_requests
                 (id, post_id, post_title, owner_email, owner_name, sender_name, sender_email, sender_phone, message, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                rusqlite::params![
                    req.id,
                    req.post_id,
                    req.post_title,
                    req.owner_email,
                    req.owner_name,
                    req.sender_name,
                    req.sender_email,
                    req.sender_phone,
                    req.message,
                    req.status,
                    req.created_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn set_contact_request_status(&self, id: &str, status: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE contact_requests SET status = ?1 WHERE id = ?2",
                (status, id),
            )?;
            Ok(())
        })
    }

    /// Most recent pending contact requests, newest first.
    pub fn list_pending_contact_requests(&self, limit: u32) -> Result<Vec<ContactRequestRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, post_id, post_title, owner_email, owner_name, sender_name, sender_email, sender_phone, message, status, created_at
                 FROM contact_requests
                 WHERE status = 'pending'
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map([limit], map_contact_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

// -- Row mappers and filter assembly --

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn map_post_row(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        location: row.get(4)?,
        image_path: row.get(5)?,
        status: row.get(6)?,
        owner_id: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn map_contact_row(row: &Row<'_>) -> rusqlite::Result<ContactRequestRow> {
    Ok(ContactRequestRow {
        id: row.get(0)?,
        post_id: row.get(1)?,
        post_title: row.get(2)?,
        owner_email: row.get(3)?,
        owner_name: row.get(4)?,
        sender_name: row.get(5)?,
        sender_email: row.get(6)?,
        sender_phone: row.get(7)?,
        message: row.get(8)?,
        status: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Build a WHERE clause with positional params from the composable
/// filter fields. Substring matches are case-insensitive.
fn filter_clause(filter: &PostFilter, owner_id: Option<&str>) -> (String, Vec<String>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(owner) = owner_id {
        params.push(owner.to_string());
        clauses.push(format!("p.owner_id = ?{}", params.len()));
    }
    if let Some(title) = &filter.title {
        params.push(title.clone());
        clauses.push(format!("instr(lower(p.title), lower(?{})) > 0", params.len()));
    }
    if let Some(category) = &filter.category {
        params.push(category.clone());
        clauses.push(format!("p.category = ?{}", params.len()));
    }
    if let Some(status) = &filter.status {
        params.push(status.clone());
        clauses.push(format!("p.status = ?{}", params.len()));
    }
    if let Some(location) = &filter.location {
        params.push(location.clone());
        clauses.push(format!("instr(lower(p.location), lower(?{})) > 0", params.len()));
    }

    if clauses.is_empty() {
        (String::new(), params)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), params)
    }
}
