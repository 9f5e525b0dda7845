//! One-time events.
//!
//! A one-time event completes at most once. Any number of waiters may
//! subscribe before or after completion and all of them observe the value of
//! the first completion.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::str::FromStr;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::EventBusError;

/// The closed set of one-time events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OneTimeEvent {
    /// The `<dialog>` polyfill finished loading.
    #[serde(rename = "dialog.polyfill")]
    DialogPolyfill,
    /// The socket connected for the first time.
    #[serde(rename = "socket.hasConnected")]
    SocketHasConnected,
    /// Bot development images are available.
    #[serde(rename = "botdev.images.ready")]
    BotdevImagesReady,
}

impl OneTimeEvent {
    /// Every one-time event
    pub const ALL: [OneTimeEvent; 3] = [
        OneTimeEvent::DialogPolyfill,
        OneTimeEvent::SocketHasConnected,
        OneTimeEvent::BotdevImagesReady,
    ];

    /// Wire name of the event
    pub fn name(self) -> &'static str {
        match self {
            OneTimeEvent::DialogPolyfill => "dialog.polyfill",
            OneTimeEvent::SocketHasConnected => "socket.hasConnected",
            OneTimeEvent::BotdevImagesReady => "botdev.images.ready",
        }
    }
}

impl std::fmt::Display for OneTimeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a name outside the one-time event set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown one-time event: {0}")]
pub struct UnknownOneTimeEvent(pub String);

impl FromStr for OneTimeEvent {
    type Err = UnknownOneTimeEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OneTimeEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| UnknownOneTimeEvent(s.to_string()))
    }
}

/// Observable lifecycle of a one-time event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OneTimeState {
    /// Nobody has waited for or completed the event yet.
    Unregistered,
    /// At least one waiter exists and the event has not completed.
    Pending,
    /// The event completed; its value is final.
    Completed,
}

#[derive(Debug, Clone)]
enum Phase {
    Pending,
    Completed(Value),
}

/// Records for every one-time event touched so far.
#[derive(Debug, Default)]
pub(crate) struct OneTimeRegistry {
    records: Mutex<HashMap<OneTimeEvent, watch::Sender<Phase>>>,
}

impl OneTimeRegistry {
    pub(crate) fn after(
        &self,
        event: OneTimeEvent,
    ) -> impl Future<Output = Result<Value, EventBusError>> + Send + 'static {
        let mut receiver = {
            let mut records = self.records.lock();
            records
                .entry(event)
                .or_insert_with(|| {
                    debug!(%event, "One-time event pending");
                    watch::channel(Phase::Pending).0
                })
                .subscribe()
        };

        async move {
            let dropped = move || EventBusError::BusDropped {
                event: event.to_string(),
            };
            match receiver
                .wait_for(|phase| matches!(phase, Phase::Completed(_)))
                .await
            {
                Ok(phase) => match &*phase {
                    Phase::Completed(value) => Ok(value.clone()),
                    Phase::Pending => Err(dropped()),
                },
                Err(_) => Err(dropped()),
            }
        }
    }

    /// Complete `event` with `value`. Returns false if it had already completed.
    pub(crate) fn complete(&self, event: OneTimeEvent, value: Value) -> bool {
        let mut records = self.records.lock();
        match records.get(&event) {
            Some(sender) => {
                let completed = sender.send_if_modified(|phase| match phase {
                    Phase::Pending => {
                        *phase = Phase::Completed(value);
                        true
                    }
                    Phase::Completed(_) => false,
                });
                if completed {
                    debug!(%event, waiters = sender.receiver_count(), "One-time event completed");
                } else {
                    warn!(%event, "One-time event already completed, ignoring");
                }
                completed
            }
            None => {
                debug!(%event, "One-time event completed before any waiter");
                records.insert(event, watch::channel(Phase::Completed(value)).0);
                true
            }
        }
    }

    pub(crate) fn state(&self, event: OneTimeEvent) -> OneTimeState {
        match self.records.lock().get(&event) {
            None => OneTimeState::Unregistered,
            Some(sender) => match *sender.borrow() {
                Phase::Pending => OneTimeState::Pending,
                Phase::Completed(_) => OneTimeState::Completed,
            },
        }
    }
}
