use std::collections::BTreeSet;

use crate::domain::message::MessageId;

/// Starred message ids.
///
/// Independent of the fetch lifecycle: an id stays starred across reloads that
/// drop the message, and shows up again if the message comes back.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StarSet {
    ids: BTreeSet<MessageId>,
}

impl StarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns whether it is now starred.
    pub fn toggle(&mut self, id: MessageId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_starred(&self, id: MessageId) -> bool {
        self.ids.contains(&id)
    }

    pub fn all(&self) -> &BTreeSet<MessageId> {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<MessageId> for StarSet {
    fn from_iter<I: IntoIterator<Item = MessageId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut stars = StarSet::new();
        assert!(stars.toggle(3));
        assert!(stars.is_starred(3));
        assert!(!stars.toggle(3));
        assert!(!stars.is_starred(3));
    }

    #[test]
    fn even_toggles_restore_original_state() {
        for initially_starred in [false, true] {
            let mut stars = StarSet::new();
            if initially_starred {
                stars.toggle(11);
            }
            for _ in 0..6 {
                stars.toggle(11);
            }
            assert_eq!(stars.is_starred(11), initially_starred);
        }
    }

    #[test]
    fn toggling_one_id_leaves_others_alone() {
        let mut stars: StarSet = [1, 2].into_iter().collect();
        stars.toggle(99);
        stars.toggle(1);

        let ids: Vec<_> = stars.all().iter().copied().collect();
        assert_eq!(ids, vec![2, 99]);
    }
}
