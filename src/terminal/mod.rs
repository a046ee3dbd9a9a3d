pub mod events;
pub mod state;
pub mod ui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::mail::MailboxProvider;
use crate::state::task::CORE_TASK;
use crate::tasks::TaskRunner;
use crate::terminal::events::{Action, handle_key};
use crate::terminal::state::{AppEvent, AppState};
use crate::view::ViewQuery;

const TICK: Duration = Duration::from_millis(100);

/// Background work the UI loop hands out.
struct Workers {
    provider: Arc<dyn MailboxProvider>,
    runner: Arc<dyn TaskRunner>,
    tx: UnboundedSender<AppEvent>,
}

impl Workers {
    fn reload(&self, state: &mut AppState) {
        let Some(ticket) = state.mailbox.begin_load() else {
            return;
        };
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.fetch_messages().await;
            let _ = tx.send(AppEvent::Loaded(ticket, result));
        });
    }

    fn run_task(&self, state: &mut AppState) {
        let ticket = state.mailbox.begin_task();
        let runner = Arc::clone(&self.runner);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = runner.run(CORE_TASK).await;
            let _ = tx.send(AppEvent::TaskDone(ticket, result));
        });
    }
}

pub async fn run_tui(
    provider: Arc<dyn MailboxProvider>,
    runner: Arc<dyn TaskRunner>,
    query: ViewQuery,
) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("{e}"))?;
    log::info!("starting TUI with {} source", provider.name());

    let (tx, rx) = mpsc::unbounded_channel();
    let workers = Workers {
        provider,
        runner,
        tx,
    };

    let terminal = ratatui::init();
    let result = run(terminal, workers, rx, AppState::new(query));
    ratatui::restore();

    result
}

fn run(
    mut terminal: DefaultTerminal,
    workers: Workers,
    mut rx: UnboundedReceiver<AppEvent>,
    mut state: AppState,
) -> Result<()> {
    workers.reload(&mut state);

    loop {
        while let Ok(ev) = rx.try_recv() {
            state.apply(ev);
        }

        terminal.draw(|f| ui::render(f, &state))?;

        if !tokio::task::block_in_place(|| event::poll(TICK))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(key, &mut state) {
            Action::Quit => return Ok(()),
            Action::Reload => workers.reload(&mut state),
            Action::RunTask => workers.run_task(&mut state),
            Action::None => {}
        }
    }
}
