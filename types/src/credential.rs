//! Credential (soulbound token) state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Participant;

/// Globally unique credential identifier. The first issued credential is 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(u64);

impl TokenId {
    pub const FIRST: Self = Self(1);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// The id after this one, or `None` if the counter is exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which eligibility path unlocked a credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssuancePath {
    /// Aggregate reputation met the registry threshold.
    Reputation,
    /// A zero-knowledge proof of eligibility verified.
    Proof,
}

/// Per-participant issuance state. `NotIssued -> Issued` happens at most once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialState {
    #[default]
    NotIssued,
    Issued(TokenId),
}

impl CredentialState {
    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued(_))
    }

    pub fn token_id(&self) -> Option<TokenId> {
        match self {
            Self::Issued(id) => Some(*id),
            Self::NotIssued => None,
        }
    }
}

/// An issued, non-transferable credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token_id: TokenId,
    pub owner: Participant,
    pub path: IssuancePath,
}

impl Credential {
    pub fn state(&self) -> CredentialState {
        CredentialState::Issued(self.token_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_not_issued() {
        let state = CredentialState::default();
        assert!(!state.is_issued());
        assert_eq!(state.token_id(), None);
    }

    #[test]
    fn credential_reports_issued_state() {
        let cred = Credential {
            token_id: TokenId::FIRST,
            owner: Participant::from_low_u64(1),
            path: IssuancePath::Reputation,
        };
        assert_eq!(cred.state(), CredentialState::Issued(TokenId::new(1)));
        assert_eq!(cred.state().token_id(), Some(TokenId::FIRST));
    }

    #[test]
    fn token_id_counter_stops_at_max() {
        assert_eq!(TokenId::FIRST.next(), Some(TokenId::new(2)));
        assert_eq!(TokenId::new(u64::MAX).next(), None);
    }
}
