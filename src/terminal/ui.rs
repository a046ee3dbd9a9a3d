use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::state::load::LoadStatus;
use crate::terminal::state::{AppState, Focus};
use crate::view::avatar::{Avatar, Rgb};
use crate::view::{Detail, Folder, ListRow, MailboxView};

pub fn render(f: &mut Frame, state: &AppState) {
    let [main, status_bar, footer] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let [folders, list, detail] = Layout::horizontal([
        Constraint::Length(22),
        Constraint::Percentage(40),
        Constraint::Fill(1),
    ])
    .areas(main);

    let view = state.mailbox.view(&state.query);

    render_folders(f, folders, state);
    render_list(f, list, state, &view);
    render_detail(f, detail, state, &view);

    let mut status = vec![Span::styled(
        status_line(view.status),
        status_style(view.status),
    )];
    if let Some(notice) = &state.notice {
        status.push(Span::styled(
            format!("  {notice}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(status)), status_bar);

    f.render_widget(hints(), footer);
}

/// Text of the load status indicator.
pub fn status_line(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Idle => String::new(),
        LoadStatus::Loading => "Loading...".to_string(),
        LoadStatus::Loaded => "Inbox Updated".to_string(),
        LoadStatus::Failed(reason) => format!("Error: {reason}"),
    }
}

fn status_style(status: &LoadStatus) -> Style {
    match status {
        LoadStatus::Failed(_) => Style::default().fg(Color::Red),
        LoadStatus::Loading => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(Color::Gray),
    }
}

fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

fn render_folders(f: &mut Frame, area: Rect, state: &AppState) {
    let [nav, task] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(5)]).areas(area);

    let store = state.mailbox.store();
    let items: Vec<ListItem> = Folder::ALL
        .iter()
        .map(|folder| {
            let count = match folder {
                Folder::Inbox => store.len(),
                Folder::Starred => store
                    .messages()
                    .iter()
                    .filter(|m| state.mailbox.stars().is_starred(m.id))
                    .count(),
            };
            ListItem::new(format!("{} ({count})", folder.label()))
        })
        .collect();

    let current = Folder::ALL.iter().position(|x| *x == state.query.folder);
    let list = List::new(items)
        .block(
            Block::default()
                .title(" Mail ")
                .borders(Borders::ALL)
                .border_style(border(state.focus == Focus::Folders)),
        )
        .highlight_symbol("➜ ")
        .highlight_style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD));
    f.render_stateful_widget(list, nav, &mut ListState::default().with_selected(current));

    let task_status = state.mailbox.task_status();
    let task_style = if task_status.is_running() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let task_box = Paragraph::new(vec![
        Line::from(Span::styled("t  run safe task", Style::default().fg(Color::Green))),
        Line::from(Span::styled(task_status.to_string(), task_style)),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().title(" Security ").borders(Borders::ALL));
    f.render_widget(task_box, task);
}

fn render_list(f: &mut Frame, area: Rect, state: &AppState, view: &MailboxView<'_>) {
    let [search, rows] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let search_text = if state.searching {
        format!("{}▏", state.query.search)
    } else if state.query.search.is_empty() {
        "/ to search".to_string()
    } else {
        state.query.search.clone()
    };
    let search_style = if state.query.search.is_empty() && !state.searching {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(Span::styled(search_text, search_style)).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(border(state.searching)),
        ),
        search,
    );

    let items: Vec<ListItem> = view.rows.iter().map(list_item).collect();
    let title = format!(" {} ({}) ", state.query.folder.label(), view.rows.len());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border(state.focus == Focus::List && !state.searching)),
        )
        .highlight_symbol("▌")
        .highlight_style(Style::default().bg(Color::Rgb(0x1c, 0x1c, 0x1e)));

    f.render_stateful_widget(
        list,
        rows,
        &mut ListState::default().with_selected(view.selected_row()),
    );
}

fn list_item<'a>(row: &ListRow<'a>) -> ListItem<'a> {
    let m = row.message;
    let star = if row.starred { "★ " } else { "  " };
    let head = Line::from(vec![
        Span::styled(star, Style::default().fg(Color::Yellow)),
        Span::styled(
            m.sender.as_str(),
            Style::default()
                .fg(rgb(row.avatar.color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", m.date), Style::default().fg(Color::DarkGray)),
    ]);
    let subject = Line::from(format!("  {}", m.subject));
    let preview = Line::from(Span::styled(
        format!("  {}", m.preview),
        Style::default().fg(Color::Gray),
    ));
    ListItem::new(Text::from(vec![head, subject, preview]))
}

fn render_detail(f: &mut Frame, area: Rect, state: &AppState, view: &MailboxView<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border(state.focus == Focus::Detail));

    let Some(detail) = &view.detail else {
        let text = match view.status {
            LoadStatus::Loading if state.mailbox.store().is_empty() => "Loading...",
            _ => "No message selected",
        };
        f.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))).block(block),
            area,
        );
        return;
    };

    f.render_widget(
        Paragraph::new(detail_text(detail))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.body_scroll, 0)),
        area,
    );
}

fn avatar_span(avatar: Avatar) -> Span<'static> {
    Span::styled(
        format!(" {} ", avatar.initial),
        Style::default()
            .fg(Color::Black)
            .bg(rgb(avatar.color))
            .add_modifier(Modifier::BOLD),
    )
}

fn detail_text<'a>(detail: &Detail<'a>) -> Text<'a> {
    let m = detail.message;
    let mut subject = vec![Span::styled(
        m.subject.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if detail.starred {
        subject.push(Span::styled("  ★", Style::default().fg(Color::Yellow)));
    }

    Text::from(vec![
        Line::from(subject),
        Line::default(),
        Line::from(vec![
            avatar_span(detail.avatar),
            Span::raw(" "),
            Span::styled(m.sender.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", m.date), Style::default().fg(Color::DarkGray)),
        ]),
        Line::default(),
        Line::from(m.preview.as_str()),
    ])
}

fn hints() -> Paragraph<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));
    Paragraph::new(Line::from(vec![
        key("j/k"),
        Span::raw(" move  "),
        key("s"),
        Span::raw(" star  "),
        key("/"),
        Span::raw(" search  "),
        key("1/2"),
        Span::raw(" folder  "),
        key("Tab"),
        Span::raw(" focus  "),
        key("r"),
        Span::raw(" reload  "),
        key("t"),
        Span::raw(" task  "),
        key("q"),
        Span::raw(" quit"),
    ]))
}
