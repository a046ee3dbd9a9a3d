pub mod decoders;
pub mod demo;
pub mod eml_dir;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::config::{SourceConfig, SourceKind};
use crate::domain::error::FetchError;
use crate::domain::message::Message;
use crate::store::sqlite::SqliteCache;

use demo::DemoProvider;
use eml_dir::EmlDirProvider;

/// Answers the one mailbox query: the current messages, in display order.
#[async_trait]
pub trait MailboxProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_messages(&self) -> Result<Vec<Message>, FetchError>;
}

pub fn open_provider(source: &SourceConfig) -> Result<Arc<dyn MailboxProvider>> {
    let need_path = || {
        source
            .path
            .clone()
            .ok_or_else(|| anyhow!("source.path must be set for the {:?} source", source.kind))
    };

    Ok(match source.kind {
        SourceKind::Demo => Arc::new(DemoProvider::new()),
        SourceKind::EmlDir => Arc::new(EmlDirProvider::new(need_path()?)),
        SourceKind::Sqlite => Arc::new(SqliteCache::new(need_path()?)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_needs_no_path() {
        let p = open_provider(&SourceConfig::default()).unwrap();
        assert_eq!(p.name(), "demo");
    }

    #[test]
    fn file_sources_need_a_path() {
        let source = SourceConfig {
            kind: SourceKind::Sqlite,
            path: None,
        };
        assert!(open_provider(&source).is_err());

        let source = SourceConfig {
            kind: SourceKind::EmlDir,
            path: Some("/tmp/mail".into()),
        };
        assert_eq!(open_provider(&source).unwrap().name(), "eml-dir");
    }
}
