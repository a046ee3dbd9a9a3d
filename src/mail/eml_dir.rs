use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{debug, warn};
use mailparse::MailHeaderMap;

use crate::domain::error::FetchError;
use crate::domain::message::{Message, MessageId};
use crate::mail::MailboxProvider;
use crate::mail::decoders::{PREVIEW_CHARS, body_text, display_sender, normalize_snippet};

/// Reads a directory of `.eml` files as one mailbox.
///
/// Files are listed in name order. A file keeps the id it was first given
/// for the lifetime of the provider, so stars and the selection still point
/// at the same message after new files show up. Files that fail to parse
/// are skipped.
#[derive(Debug, Clone)]
pub struct EmlDirProvider {
    dir: PathBuf,
    ids: Arc<Mutex<IdMap>>,
}

/// Path to id assignments, handed out from 1 in first-seen order.
#[derive(Debug, Default)]
struct IdMap {
    by_path: HashMap<PathBuf, MessageId>,
    last: MessageId,
}

impl IdMap {
    fn id_for(&mut self, path: &Path) -> Result<MessageId, FetchError> {
        if let Some(&id) = self.by_path.get(path) {
            return Ok(id);
        }
        let id = self
            .last
            .checked_add(1)
            .ok_or_else(|| FetchError::Backend("message ids exhausted".into()))?;
        self.last = id;
        self.by_path.insert(path.to_path_buf(), id);
        Ok(id)
    }
}

impl EmlDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ids: Arc::default(),
        }
    }
}

#[async_trait]
impl MailboxProvider for EmlDirProvider {
    fn name(&self) -> &str {
        "eml-dir"
    }

    async fn fetch_messages(&self) -> Result<Vec<Message>, FetchError> {
        let dir = self.dir.clone();
        let ids = Arc::clone(&self.ids);
        tokio::task::spawn_blocking(move || {
            let mut ids = ids
                .lock()
                .map_err(|_| FetchError::Backend("id map poisoned".into()))?;
            read_dir(&dir, &mut ids)
        })
            .await
            .map_err(|e| FetchError::Backend(format!("reader task failed: {e}")))?
    }
}

fn read_dir(dir: &Path, ids: &mut IdMap) -> Result<Vec<Message>, FetchError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("eml"))
        })
        .collect();
    files.sort();
    debug!("{} .eml file(s) in {}", files.len(), dir.display());

    let mut out = Vec::with_capacity(files.len());
    for path in files {
        let id = ids.id_for(&path)?;
        match read_message(id, &path) {
            Ok(m) => out.push(m),
            Err(e) => warn!("skipping {}: {e}", path.display()),
        }
    }
    Ok(out)
}

fn read_message(id: MessageId, path: &Path) -> Result<Message, FetchError> {
    let raw = fs::read(path)?;
    let parsed = mailparse::parse_mail(&raw).map_err(|e| FetchError::Parse {
        what: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let header = |name: &str| {
        parsed
            .headers
            .get_first_value(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let subject = match header("Subject") {
        s if s.is_empty() => "(no subject)".to_string(),
        s => s,
    };
    let preview = body_text(&parsed)
        .map(|b| normalize_snippet(&b, PREVIEW_CHARS))
        .unwrap_or_default();

    Ok(Message {
        id,
        sender: display_sender(&header("From")),
        subject,
        preview,
        date: header("Date"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mailbox;
    use crate::view::ViewQuery;

    const MOM: &str = "From: Mom <mom@example.com>\r\nSubject: Dinner?\r\n\
        Date: Fri, 3 Jan 2025 18:00:00 +0000\r\n\r\nAre you coming over\r\nthis weekend?\r\n";
    const APPLE: &str = "From: =?UTF-8?Q?Apple_Store?= <no_reply@apple.com>\r\n\
        Subject: Your Receipt\r\n\r\nThank you for your purchase.\r\n";
    const SPAM: &str = "From: deals@example.com\r\nSubject: Buy now\r\n\r\nLimited offer\r\n";

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[tokio::test]
    async fn reads_eml_files_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.eml", MOM);
        write(tmp.path(), "a.eml", APPLE);
        write(tmp.path(), "notes.txt", "not mail");

        let messages = EmlDirProvider::new(tmp.path())
            .fetch_messages()
            .await
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "Apple Store");
        assert_eq!(messages[0].date, "");
        assert_eq!(messages[1].sender, "Mom");
        assert_eq!(messages[1].preview, "Are you coming over this weekend?");
        assert_eq!(messages[1].date, "Fri, 3 Jan 2025 18:00:00 +0000");
    }

    #[tokio::test]
    async fn ids_stay_put_when_earlier_files_appear() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.eml", MOM);
        let provider = EmlDirProvider::new(tmp.path());

        let first = provider.fetch_messages().await.unwrap();
        assert_eq!(first.len(), 1);
        let dinner = first[0].id;

        write(tmp.path(), "a.eml", SPAM);
        let second = provider.fetch_messages().await.unwrap();

        let subjects: Vec<_> = second
            .iter()
            .map(|m| (m.id, m.subject.as_str()))
            .collect();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].1, "Buy now");
        assert_ne!(subjects[0].0, dinner);
        assert_eq!(subjects[1], (dinner, "Dinner?"));
    }

    #[tokio::test]
    async fn star_and_selection_follow_the_file_across_reloads() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.eml", MOM);
        let provider = EmlDirProvider::new(tmp.path());
        let mut mailbox = Mailbox::new();

        mailbox.request(&provider).await;
        let dinner = mailbox.selection().unwrap();
        assert!(mailbox.toggle_star(dinner));

        write(tmp.path(), "a.eml", SPAM);
        mailbox.request(&provider).await;

        let view = mailbox.view(&ViewQuery::default());
        assert_eq!(view.rows.len(), 2);
        let starred: Vec<_> = view
            .rows
            .iter()
            .filter(|r| r.starred)
            .map(|r| r.message.subject.as_str())
            .collect();
        assert_eq!(starred, vec!["Dinner?"]);
        let detail = view.detail.map(|d| d.message.subject.as_str());
        assert_eq!(detail, Some("Dinner?"));
    }

    #[tokio::test]
    async fn missing_subject_gets_placeholder() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "x.eml", "From: a@b.c\r\n\r\nhi\r\n");

        let messages = EmlDirProvider::new(tmp.path())
            .fetch_messages()
            .await
            .unwrap();
        assert_eq!(messages[0].subject, "(no subject)");
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = EmlDirProvider::new(tmp.path().join("nope"))
            .fetch_messages()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }
}
