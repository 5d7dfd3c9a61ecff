use crate::bookmarks::BookmarkStore;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};
use anyhow::Result;
use async_trait::async_trait;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;
use tokio::sync::Mutex;

const MIGRATIONS_TABLE: &str = include_str!("migrations/system/000_migrations_table.sql");

const MIGRATIONS: &[(&str, &str)] = &[("001_bookmarks.sql", include_str!("migrations/001_bookmarks.sql"))];

const BOOKMARK_COLUMNS: &str = "id, title, url, description, rating";

pub struct Database {
    _db: LibsqlDatabase,
    conn: Connection,
    write_lock: Mutex<()>,
}

impl Database {
    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let mut rows = conn
            .query("SELECT 1 FROM _migrations WHERE name = ?", libsql::params![name])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        conn.execute(query, libsql::params![name]).await?;
        Ok(())
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }

    /// Open (or create) the database file at `path` and bring its schema up to date.
    pub async fn new(path: &Path) -> Result<Self> {
        tracing::info!(path = ?path, "[db] opening local database");
        let db = Builder::new_local(path).build().await?;

        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        conn.execute_batch(MIGRATIONS_TABLE)
            .await
            .map_err(|e| anyhow::anyhow!("failed to create migrations table: {e}"))?;
        for (filename, sql) in MIGRATIONS {
            Self::run_migration(&conn, filename, sql).await?;
        }

        Ok(Database {
            _db: db,
            conn,
            write_lock: Mutex::new(()),
        })
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating: row.get(4)?,
        })
    }
}

#[async_trait]
impl BookmarkStore for Database {
    async fn list(&self) -> Result<Vec<Bookmark>> {
        let query = format!("SELECT {BOOKMARK_COLUMNS} FROM bookmarks ORDER BY id");
        let mut rows = self.conn.query(&query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    async fn get(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = format!("SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = ?");
        let mut rows = self.conn.query(&query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    async fn insert(&self, bookmark: NewBookmark) -> Result<Bookmark> {
        let _guard = self.write_lock.lock().await;
        let query = format!(
            "INSERT INTO bookmarks (title, url, description, rating) VALUES (?, ?, ?, ?) RETURNING {BOOKMARK_COLUMNS}"
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![bookmark.title, bookmark.url, bookmark.description, bookmark.rating],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Self::row_to_bookmark(&row)
        } else {
            anyhow::bail!("insert into bookmarks returned no row")
        }
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<bool> {
        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = patch.title {
            updates.push("title = ?");
            params.push(title.into());
        }
        if let Some(url) = patch.url {
            updates.push("url = ?");
            params.push(url.into());
        }
        if let Some(description) = patch.description {
            updates.push("description = ?");
            params.push(description.into());
        }
        if let Some(rating) = patch.rating {
            updates.push("rating = ?");
            params.push(rating.into());
        }

        let _guard = self.write_lock.lock().await;
        if updates.is_empty() {
            return Ok(self.get(id).await?.is_some());
        }

        params.push(id.into());
        let query = format!("UPDATE bookmarks SET {} WHERE id = ?", updates.join(", "));
        let changed = self.conn.execute(&query, params).await?;
        Ok(changed > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let changed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(changed > 0)
    }
}
