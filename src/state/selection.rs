use crate::domain::message::MessageId;

/// The message currently open in the detail pane.
///
/// Ids are not checked against the store; an unknown id just renders no detail.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    current: Option<MessageId>,
}

impl Selection {
    pub fn select(&mut self, id: MessageId) {
        self.current = Some(id);
    }

    pub fn current(&self) -> Option<MessageId> {
        self.current
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_selected(&self, id: MessageId) -> bool {
        self.current == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_clear() {
        let mut sel = Selection::default();
        assert_eq!(sel.current(), None);

        sel.select(42);
        assert_eq!(sel.current(), Some(42));
        assert!(sel.is_selected(42));

        sel.select(7);
        assert!(!sel.is_selected(42));

        sel.clear();
        assert_eq!(sel.current(), None);
    }
}
