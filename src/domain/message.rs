use serde::{Deserialize, Serialize};

pub type MessageId = u32;

/// One mail item as delivered by a mailbox provider.
///
/// `date` is display text and is never parsed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub subject: String,
    pub preview: String,
    pub date: String,
}

impl Message {
    pub fn new(
        id: MessageId,
        sender: impl Into<String>,
        subject: impl Into<String>,
        preview: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender: sender.into(),
            subject: subject.into(),
            preview: preview.into(),
            date: date.into(),
        }
    }
}
