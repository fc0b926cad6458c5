use thiserror::Error;

/// Failures of the pairing primitive on malformed inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("coordinate is not below the base field modulus")]
    CoordinateOutOfRange,

    #[error("point is not on the curve")]
    NotOnCurve,

    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,

    #[error("scalar is not below the scalar field modulus")]
    ScalarOutOfRange,
}

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("invalid field element {0:?}")]
    InvalidFieldElement(String),

    #[error("malformed {what}: {reason}")]
    Malformed { what: &'static str, reason: String },

    #[error("unsupported proof system: protocol {protocol}, curve {curve}")]
    Unsupported { protocol: String, curve: String },

    #[error("verification key declares {declared} public inputs but has {ic} IC points")]
    IcMismatch { declared: usize, ic: usize },

    #[error("expected {expected} public inputs, got {got}")]
    InputArity { expected: usize, got: usize },

    #[error("public input {0} is not in the scalar field")]
    InputOutOfField(usize),

    #[error("curve error: {0}")]
    Curve(#[from] CurveError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
