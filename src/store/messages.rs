use crate::domain::message::{Message, MessageId};

/// Canonical message set from the most recent successful fetch.
///
/// The set is only ever swapped whole; there is no per-message update.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Messages in provider order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn first_id(&self) -> Option<MessageId> {
        self.messages.first().map(|m| m.id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: MessageId, sender: &str) -> Message {
        Message::new(id, sender, "subject", "preview", "Friday")
    }

    #[test]
    fn replace_discards_previous_set() {
        let mut store = MessageStore::new();
        store.replace(vec![msg(1, "Apple"), msg(2, "GitHub")]);
        store.replace(vec![msg(3, "Mom")]);

        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        assert_eq!(store.get(3).map(|m| m.sender.as_str()), Some("Mom"));
    }

    #[test]
    fn keeps_provider_order() {
        let mut store = MessageStore::new();
        store.replace(vec![msg(9, "c"), msg(2, "a"), msg(5, "b")]);

        let ids: Vec<_> = store.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![9, 2, 5]);
        assert_eq!(store.first_id(), Some(9));
    }

    #[test]
    fn empty_store_has_no_first_id() {
        let store = MessageStore::new();
        assert!(store.is_empty());
        assert_eq!(store.first_id(), None);
        assert!(store.get(1).is_none());
    }
}
