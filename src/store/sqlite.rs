use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;
use rusqlite::{Connection, OpenFlags, params};

use crate::domain::error::FetchError;
use crate::domain::message::{Message, MessageId};
use crate::mail::MailboxProvider;

/// Local SQLite message cache used as a mailbox source.
///
/// The provider side only reads; [`SqliteCache::seed`] is how rows get in.
#[derive(Debug, Clone)]
pub struct SqliteCache {
    path: PathBuf,
}

impl SqliteCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the schema if needed and upserts `messages`, keeping their
    /// order as the display order.
    pub fn seed(&self, messages: &[Message]) -> Result<(), FetchError> {
        let mut conn = Connection::open(&self.path)?;
        migrate(&conn)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO messages (id, sender, subject, preview, date, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(id) DO UPDATE SET
                  sender=excluded.sender,
                  subject=excluded.subject,
                  preview=excluded.preview,
                  date=excluded.date,
                  position=excluded.position
                "#,
            )?;

            for (pos, m) in messages.iter().enumerate() {
                stmt.execute(params![m.id, m.sender, m.subject, m.preview, m.date, pos as i64])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Fetches everything `source` has and seeds it into the cache.
    pub async fn import_from(&self, source: &dyn MailboxProvider) -> Result<usize, FetchError> {
        let messages = source.fetch_messages().await?;
        info!(
            "caching {} message(s) from {} into {}",
            messages.len(),
            source.name(),
            self.path.display()
        );

        let cache = self.clone();
        let count = messages.len();
        tokio::task::spawn_blocking(move || cache.seed(&messages))
            .await
            .map_err(|e| FetchError::Backend(format!("cache writer failed: {e}")))??;
        Ok(count)
    }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id        INTEGER PRIMARY KEY,
            sender    TEXT NOT NULL,
            subject   TEXT NOT NULL,
            preview   TEXT NOT NULL,
            date      TEXT NOT NULL,
            position  INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
}

fn read_all(path: &Path) -> Result<Vec<Message>, FetchError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let mut stmt = conn.prepare(
        r#"
        SELECT id, sender, subject, preview, date
        FROM messages
        ORDER BY position ASC, id ASC
        "#,
    )?;

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(Message {
            id: r.get::<_, MessageId>(0)?,
            sender: r.get(1)?,
            subject: r.get(2)?,
            preview: r.get(3)?,
            date: r.get(4)?,
        });
    }
    Ok(out)
}

#[async_trait]
impl MailboxProvider for SqliteCache {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn fetch_messages(&self) -> Result<Vec<Message>, FetchError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_all(&path))
            .await
            .map_err(|e| FetchError::Backend(format!("cache reader failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::mail::demo::{DemoProvider, sample_messages};

    #[tokio::test]
    async fn seeded_rows_come_back_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = SqliteCache::new(tmp.path().join("mail.db"));

        let mut messages = sample_messages();
        messages.reverse();
        cache.seed(&messages).unwrap();

        let loaded = cache.fetch_messages().await.unwrap();
        assert_eq!(loaded, messages);
    }

    #[tokio::test]
    async fn reseeding_updates_existing_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = SqliteCache::new(tmp.path().join("mail.db"));
        cache.seed(&sample_messages()).unwrap();

        let edited = Message::new(
            2,
            "GitHub",
            "Security Alert (resolved)",
            "All good",
            "Today",
        );
        cache.seed(std::slice::from_ref(&edited)).unwrap();

        let loaded = cache.fetch_messages().await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(loaded.contains(&edited));
    }

    #[tokio::test]
    async fn import_copies_a_provider_into_the_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = SqliteCache::new(tmp.path().join("mail.db"));
        let demo = DemoProvider::with_latency(Duration::ZERO);

        let count = cache.import_from(&demo).await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(cache.fetch_messages().await.unwrap(), sample_messages());
    }

    #[tokio::test]
    async fn out_of_range_id_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mail.db");
        let cache = SqliteCache::new(&path);
        cache.seed(&sample_messages()).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO messages (id, sender, subject, preview, date, position)
             VALUES (?1, 'x', 'y', 'z', '', 9)",
            params![u32::MAX as i64 + 2],
        )
        .unwrap();
        drop(conn);

        let err = cache.fetch_messages().await.unwrap_err();
        assert!(matches!(err, FetchError::Database(_)));
    }

    #[tokio::test]
    async fn missing_database_is_a_cache_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = SqliteCache::new(tmp.path().join("absent.db"))
            .fetch_messages()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Database(_)));
    }
}
