use crate::domain::message::Message;

/// Case-insensitive substring match over sender, subject and preview.
///
/// An empty query matches everything.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: (!text.is_empty()).then(|| text.to_lowercase()),
        }
    }

    pub fn matches(&self, message: &Message) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        [&message.sender, &message.subject, &message.preview]
            .iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}
