//! Mailbox view state: the single owner of everything the panes render.

pub mod load;
pub mod selection;
pub mod stars;
pub mod task;

use crate::domain::error::{FetchError, TaskError};
use crate::domain::message::{Message, MessageId};
use crate::mail::MailboxProvider;
use crate::store::messages::MessageStore;
use crate::tasks::TaskRunner;
use crate::view::{self, MailboxView, ViewQuery};

use load::{LoadController, LoadOutcome, LoadStatus, LoadTicket};
use selection::Selection;
use stars::StarSet;
use task::{TaskInvoker, TaskStatus, TaskTicket};

/// State container for one mailbox window.
///
/// All mutation goes through the methods below; the view layer only ever sees
/// a shared borrow.
#[derive(Debug, Default)]
pub struct Mailbox {
    load: LoadController,
    selection: Selection,
    stars: StarSet,
    task: TaskInvoker,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &MessageStore {
        self.load.store()
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.load.store().get(id)
    }

    pub fn selection(&self) -> Option<MessageId> {
        self.selection.current()
    }

    pub fn stars(&self) -> &StarSet {
        &self.stars
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.load.status()
    }

    pub fn task_status(&self) -> &TaskStatus {
        self.task.status()
    }

    // ----- selection & stars -----

    pub fn select(&mut self, id: MessageId) {
        self.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn toggle_star(&mut self, id: MessageId) -> bool {
        self.stars.toggle(id)
    }

    // ----- mailbox loads -----

    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        self.load.begin()
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Message>, FetchError>,
    ) -> LoadOutcome {
        self.load.complete(ticket, result, &mut self.selection)
    }

    pub async fn request(&mut self, provider: &dyn MailboxProvider) -> LoadOutcome {
        self.load.request(provider, &mut self.selection).await
    }

    // ----- background task -----

    pub fn begin_task(&mut self) -> TaskTicket {
        self.task.begin()
    }

    pub fn complete_task(&mut self, ticket: TaskTicket, result: Result<String, TaskError>) -> bool {
        self.task.complete(ticket, result)
    }

    pub async fn run_task(&mut self, runner: &dyn TaskRunner) -> &TaskStatus {
        self.task.run(runner).await
    }

    pub fn view(&self, query: &ViewQuery) -> MailboxView<'_> {
        view::compose(
            self.load.store(),
            &self.selection,
            &self.stars,
            self.load.status(),
            query,
        )
    }
}
