//! Pure derivations from mailbox state to what the panes draw.
//!
//! Nothing here is cached: callers recompose on every frame.

pub mod avatar;
pub mod search;

use serde::Serialize;

use crate::domain::message::Message;
use crate::state::load::LoadStatus;
use crate::state::selection::Selection;
use crate::state::stars::StarSet;
use crate::store::messages::MessageStore;
use crate::view::avatar::Avatar;
use crate::view::search::SearchFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Folder {
    #[default]
    Inbox,
    Starred,
}

impl Folder {
    pub const ALL: [Folder; 2] = [Folder::Inbox, Folder::Starred];

    pub fn label(self) -> &'static str {
        match self {
            Folder::Inbox => "Inbox",
            Folder::Starred => "Starred",
        }
    }
}

/// User-controlled inputs of the list pane.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub search: String,
    pub folder: Folder,
}

impl ViewQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            folder: Folder::Inbox,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRow<'a> {
    #[serde(flatten)]
    pub message: &'a Message,
    pub starred: bool,
    pub selected: bool,
    #[serde(skip)]
    pub avatar: Avatar,
}

#[derive(Debug, Clone, Serialize)]
pub struct Detail<'a> {
    #[serde(flatten)]
    pub message: &'a Message,
    pub starred: bool,
    pub avatar: Avatar,
}

#[derive(Debug, Clone)]
pub struct MailboxView<'a> {
    pub rows: Vec<ListRow<'a>>,
    pub detail: Option<Detail<'a>>,
    pub status: &'a LoadStatus,
}

impl MailboxView<'_> {
    /// Index of the selected row, if it is visible under the current query.
    pub fn selected_row(&self) -> Option<usize> {
        self.rows.iter().position(|r| r.selected)
    }
}

pub fn compose<'a>(
    store: &'a MessageStore,
    selection: &Selection,
    stars: &StarSet,
    status: &'a LoadStatus,
    query: &ViewQuery,
) -> MailboxView<'a> {
    let filter = SearchFilter::new(&query.search);

    let rows = store
        .messages()
        .iter()
        .filter(|m| match query.folder {
            Folder::Inbox => true,
            Folder::Starred => stars.is_starred(m.id),
        })
        .filter(|m| filter.matches(m))
        .map(|m| ListRow {
            message: m,
            starred: stars.is_starred(m.id),
            selected: selection.is_selected(m.id),
            avatar: Avatar::for_sender(&m.sender),
        })
        .collect();

    let detail = selection
        .current()
        .and_then(|id| store.get(id))
        .map(|m| Detail {
            message: m,
            starred: stars.is_starred(m.id),
            avatar: Avatar::for_sender(&m.sender),
        });

    MailboxView {
        rows,
        detail,
        status,
    }
}
