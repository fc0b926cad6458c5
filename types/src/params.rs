//! Fixed configuration constants and the ledger's input bounds.

use serde::{Deserialize, Serialize};

/// Reputation needed to claim a credential without a proof.
pub const DEFAULT_THRESHOLD: u64 = 60;

/// Longest endorsement message accepted, in bytes.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 280;

/// Input bounds enforced by the endorsement ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Maximum endorsement message length in bytes (UTF-8).
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,
}

fn default_max_message_len() -> usize {
    DEFAULT_MAX_MESSAGE_LEN
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}
