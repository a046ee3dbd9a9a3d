use log::{debug, info, warn};

use crate::domain::error::FetchError;
use crate::domain::message::{Message, MessageId};
use crate::mail::MailboxProvider;
use crate::state::selection::Selection;
use crate::store::messages::MessageStore;

/// Lifecycle of the most recent mailbox fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}

/// Identifies one dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        count: usize,
        auto_selected: Option<MessageId>,
    },
    Failed(String),
    /// A fetch was already in flight; nothing new was dispatched.
    AlreadyLoading,
    /// The completion did not belong to the in-flight fetch and was dropped.
    Stale,
}

/// Owns the message set and the request lifecycle to the mailbox provider.
///
/// A load runs in two halves: [`LoadController::begin`] flips the status to
/// `Loading` and hands out a ticket, [`LoadController::complete`] applies the
/// provider's answer for that ticket. While a ticket is outstanding further
/// `begin` calls are coalesced into it.
#[derive(Debug, Default)]
pub struct LoadController {
    store: MessageStore,
    status: LoadStatus,
    issued: u64,
    in_flight: Option<LoadTicket>,
}

impl LoadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn begin(&mut self) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            debug!("load requested while one is in flight; coalescing");
            return None;
        }
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.in_flight = Some(ticket);
        self.status = LoadStatus::Loading;
        debug!("load #{} started", self.issued);
        Some(ticket)
    }

    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Message>, FetchError>,
        selection: &mut Selection,
    ) -> LoadOutcome {
        if self.in_flight != Some(ticket) {
            warn!("dropping completion for load #{}: not in flight", ticket.0);
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(messages) => {
                let count = messages.len();
                self.store.replace(messages);
                self.status = LoadStatus::Loaded;

                // Never override a choice the user already made.
                let auto_selected = match selection.current() {
                    Some(_) => None,
                    None => self.store.first_id().inspect(|id| selection.select(*id)),
                };
                info!("load #{} finished with {count} message(s)", ticket.0);
                LoadOutcome::Loaded {
                    count,
                    auto_selected,
                }
            }
            Err(e) => {
                let reason = e.to_string();
                warn!("load #{} failed: {reason}", ticket.0);
                self.status = LoadStatus::Failed(reason.clone());
                LoadOutcome::Failed(reason)
            }
        }
    }

    /// Runs a full fetch against `provider` and applies the result.
    pub async fn request(
        &mut self,
        provider: &dyn MailboxProvider,
        selection: &mut Selection,
    ) -> LoadOutcome {
        let Some(ticket) = self.begin() else {
            return LoadOutcome::AlreadyLoading;
        };
        let result = provider.fetch_messages().await;
        self.complete(ticket, result, selection)
    }
}
