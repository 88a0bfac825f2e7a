use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS posts (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT,
            category    TEXT NOT NULL,
            location    TEXT NOT NULL,
            image_path  TEXT,
            status      TEXT NOT NULL CHECK (status IN ('lost', 'found', 'returned')),
            owner_id    TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_posts_created
            ON posts(created_at);
        CREATE INDEX IF NOT EXISTS idx_posts_owner
            ON posts(owner_id, created_at);

        -- Denormalized snapshot of post/owner/sender at contact time.
        -- No foreign keys: the record must outlive the post it refers to.
        CREATE TABLE IF NOT EXISTS contact_requests (
            id           TEXT PRIMARY KEY,
            post_id      TEXT NOT NULL,
            post_title   TEXT NOT NULL,
            owner_email  TEXT NOT NULL,
            owner_name   TEXT NOT NULL,
            sender_name  TEXT NOT NULL,
            sender_email TEXT NOT NULL,
            sender_phone TEXT,
            message      TEXT NOT NULL,
            status       TEXT NOT NULL DEFAULT 'pending'
                         CHECK (status IN ('pending', 'sent', 'failed')),
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_contact_requests_status
            ON contact_requests(status, created_at);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
