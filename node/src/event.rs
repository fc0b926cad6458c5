//! Events emitted by successful calls, for subscribers.

use serde::Serialize;

use credo_types::{IssuancePath, Participant, TokenId, Value};

/// Observable effects of a successful call, delivered through the [`EventBus`]
/// and recorded on the call's receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CredoEvent {
    /// An endorsement was recorded and its payment forwarded.
    Attested {
        from: Participant,
        to: Participant,
        points: u64,
        amount_sent: Value,
    },
    /// A credential was issued.
    CredentialIssued {
        owner: Participant,
        token_id: TokenId,
        path: IssuancePath,
    },
}

type Listener = Box<dyn Fn(&CredoEvent) + Send + Sync>;

/// Synchronous fan-out event bus.
///
/// Listeners are invoked inline on the executing thread, after the call has
/// committed.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &CredoEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
