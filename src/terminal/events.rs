use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::terminal::state::{AppState, Focus};
use crate::view::Folder;

/// Work the event loop has to start in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
    RunTask,
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if state.searching {
        handle_search_keys(key, state);
        return Action::None;
    }

    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('r') => return Action::Reload,
        KeyCode::Char('t') => return Action::RunTask,

        KeyCode::Char('/') => {
            state.searching = true;
            state.focus = Focus::List;
            return Action::None;
        }
        KeyCode::Char('s') => {
            state.toggle_star_selected();
            return Action::None;
        }
        KeyCode::Char('1') => {
            state.set_folder(Folder::Inbox);
            return Action::None;
        }
        KeyCode::Char('2') => {
            state.set_folder(Folder::Starred);
            return Action::None;
        }
        KeyCode::Tab => {
            state.focus = state.focus.next();
            return Action::None;
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            return Action::None;
        }
        KeyCode::Esc => {
            state.clear_selection();
            return Action::None;
        }
        _ => {}
    }

    match state.focus {
        Focus::Folders => handle_folder_keys(key, state),
        Focus::List => handle_list_keys(key, state),
        Focus::Detail => handle_detail_keys(key, state),
    }
    Action::None
}

fn handle_search_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter => state.searching = false,
        KeyCode::Esc => {
            state.searching = false;
            state.query.search.clear();
        }
        KeyCode::Backspace => {
            state.query.search.pop();
        }
        KeyCode::Char(c) => state.query.search.push(c),
        _ => {}
    }
}

fn handle_folder_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.cycle_folder(1),
        KeyCode::Up | KeyCode::Char('k') => state.cycle_folder(-1),
        KeyCode::Enter => state.focus = Focus::List,
        _ => {}
    }
}

fn handle_list_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),
        KeyCode::Home => state.select_first(),
        KeyCode::End => state.select_last(),
        KeyCode::Enter => state.open_selected(),
        _ => {}
    }
}

fn handle_detail_keys(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.scroll_body(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_body(-1),
        KeyCode::PageDown => state.scroll_body(10),
        KeyCode::PageUp => state.scroll_body(-10),
        KeyCode::Home => state.body_scroll = 0,
        _ => {}
    }
}
