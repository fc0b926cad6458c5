use serde::{Deserialize, Serialize};

use credo_types::{Participant, DEFAULT_THRESHOLD};
use credo_verification::FieldElement;

/// Fixed policy of a registry, set once at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The deploying participant. Informational; grants no privileges.
    #[serde(default)]
    pub owner: Participant,

    /// Minimum aggregate reputation for the reputation path.
    #[serde(default = "default_threshold")]
    pub threshold: u64,

    /// Public input every eligibility proof is checked against.
    /// `[1]` is the circuit's "eligible" output.
    #[serde(default = "default_eligibility_input")]
    pub eligibility_input: Vec<FieldElement>,
}

fn default_threshold() -> u64 {
    DEFAULT_THRESHOLD
}

fn default_eligibility_input() -> Vec<FieldElement> {
    vec![FieldElement::ONE]
}

impl RegistryConfig {
    pub fn new(owner: Participant) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            owner: Participant::ZERO,
            threshold: default_threshold(),
            eligibility_input: default_eligibility_input(),
        }
    }
}
