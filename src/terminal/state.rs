use log::debug;

use crate::domain::error::{FetchError, TaskError};
use crate::domain::message::{Message, MessageId};
use crate::state::Mailbox;
use crate::state::load::{LoadOutcome, LoadTicket};
use crate::state::task::TaskTicket;
use crate::view::{Folder, ViewQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Folders,
    List,
    Detail,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Folders => Focus::List,
            Focus::List => Focus::Detail,
            Focus::Detail => Focus::Folders,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Folders => Focus::Detail,
            Focus::List => Focus::Folders,
            Focus::Detail => Focus::List,
        }
    }
}

/// Completions posted back by background work.
#[derive(Debug)]
pub enum AppEvent {
    Loaded(LoadTicket, Result<Vec<Message>, FetchError>),
    TaskDone(TaskTicket, Result<String, TaskError>),
}

pub struct AppState {
    pub mailbox: Mailbox,
    pub query: ViewQuery,

    pub focus: Focus,
    /// True while keystrokes go to the search line.
    pub searching: bool,
    pub body_scroll: u16,
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(query: ViewQuery) -> Self {
        Self {
            mailbox: Mailbox::new(),
            query,
            focus: Focus::List,
            searching: false,
            body_scroll: 0,
            notice: None,
        }
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Loaded(ticket, result) => {
                let outcome = self.mailbox.complete_load(ticket, result);
                debug!("load outcome: {outcome:?}");
                self.notice = match outcome {
                    LoadOutcome::Loaded { count, .. } => Some(format!("{count} message(s)")),
                    _ => None,
                };
            }
            AppEvent::TaskDone(ticket, result) => {
                self.mailbox.complete_task(ticket, result);
            }
        }
    }

    /// Moves the list cursor by `delta` rows; the selection follows it.
    pub fn move_selection(&mut self, delta: i32) {
        let next_id = {
            let view = self.mailbox.view(&self.query);
            if view.rows.is_empty() {
                return;
            }
            let len = view.rows.len() as i32;
            let next = match view.selected_row() {
                Some(cur) => (cur as i32 + delta).clamp(0, len - 1),
                None if delta < 0 => len - 1,
                None => 0,
            };
            view.rows[next as usize].message.id
        };
        self.select(next_id);
    }

    /// Selects the first visible row when nothing shown is selected, then
    /// moves focus to the detail pane.
    pub fn open_selected(&mut self) {
        if self.mailbox.view(&self.query).selected_row().is_none() {
            self.select_first();
        }
        self.focus = Focus::Detail;
    }

    pub fn select_first(&mut self) {
        let first = self.mailbox.view(&self.query).rows.first().map(|r| r.message.id);
        if let Some(id) = first {
            self.select(id);
        }
    }

    pub fn select_last(&mut self) {
        let last = self.mailbox.view(&self.query).rows.last().map(|r| r.message.id);
        if let Some(id) = last {
            self.select(id);
        }
    }

    fn select(&mut self, id: MessageId) {
        if self.mailbox.selection() != Some(id) {
            self.body_scroll = 0;
        }
        self.mailbox.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.mailbox.clear_selection();
        self.body_scroll = 0;
    }

    pub fn toggle_star_selected(&mut self) {
        if let Some(id) = self.mailbox.selection() {
            self.mailbox.toggle_star(id);
        }
    }

    pub fn set_folder(&mut self, folder: Folder) {
        self.query.folder = folder;
    }

    pub fn cycle_folder(&mut self, delta: i32) {
        let all = Folder::ALL;
        let cur = all.iter().position(|f| *f == self.query.folder).unwrap_or(0) as i32;
        let len = all.len() as i32;
        self.query.folder = all[(cur + delta).rem_euclid(len) as usize];
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub((-delta) as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::demo::sample_messages;

    fn loaded() -> AppState {
        let mut state = AppState::new(ViewQuery::default());
        let ticket = state.mailbox.begin_load().unwrap();
        state.apply(AppEvent::Loaded(ticket, Ok(sample_messages())));
        state
    }

    #[test]
    fn load_event_auto_selects_first() {
        let state = loaded();
        assert_eq!(state.mailbox.selection(), Some(1));
        assert_eq!(state.notice.as_deref(), Some("3 message(s)"));
    }

    #[test]
    fn cursor_moves_and_clamps() {
        let mut state = loaded();
        state.move_selection(1);
        assert_eq!(state.mailbox.selection(), Some(2));
        state.move_selection(5);
        assert_eq!(state.mailbox.selection(), Some(3));
        state.move_selection(-10);
        assert_eq!(state.mailbox.selection(), Some(1));
    }

    #[test]
    fn cursor_moves_within_filtered_rows() {
        let mut state = loaded();
        state.query.search = "weekend".into();

        // Selected message 1 is filtered out, so the cursor starts at the top.
        state.move_selection(1);
        assert_eq!(state.mailbox.selection(), Some(3));
        state.move_selection(1);
        assert_eq!(state.mailbox.selection(), Some(3));
    }

    #[test]
    fn moving_resets_scroll() {
        let mut state = loaded();
        state.scroll_body(4);
        state.move_selection(1);
        assert_eq!(state.body_scroll, 0);
    }

    #[test]
    fn star_toggles_selected_message() {
        let mut state = loaded();
        state.toggle_star_selected();
        assert!(state.mailbox.stars().is_starred(1));
        state.toggle_star_selected();
        assert!(state.mailbox.stars().is_empty());
    }

    #[test]
    fn folder_cycles_both_ways() {
        let mut state = loaded();
        state.cycle_folder(1);
        assert_eq!(state.query.folder, Folder::Starred);
        state.cycle_folder(1);
        assert_eq!(state.query.folder, Folder::Inbox);
        state.cycle_folder(-1);
        assert_eq!(state.query.folder, Folder::Starred);
    }

    #[test]
    fn task_event_updates_status() {
        let mut state = loaded();
        let ticket = state.mailbox.begin_task();
        state.apply(AppEvent::TaskDone(ticket, Ok("done".into())));
        assert_eq!(state.mailbox.task_status().to_string(), "done");
    }
}
