//! Endorsement records.

use serde::{Deserialize, Serialize};

use crate::address::Participant;
use crate::amount::Value;

/// One participant vouching for another with points and an attached payment.
///
/// Created only by a successful attest call and never mutated afterwards.
/// `sequence_index` is the record's 0-based position in the recipient's list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    pub from: Participant,
    pub to: Participant,
    pub points: u64,
    pub message: String,
    pub amount_sent: Value,
    pub sequence_index: u64,
}
