//! Endorsement ledger.
//!
//! Participants endorse one another with points and an attached payment. Each
//! endorsement is appended to the recipient's history, the recipient's
//! aggregate reputation is incremented, and the payment is forwarded to the
//! recipient, all within one atomic call.
//!
//! Aggregate reputation is maintained incrementally so eligibility checks are
//! O(1); it always equals the sum of points over the recipient's history.

pub mod endorsement;
pub mod error;

pub use endorsement::EndorsementLedger;
pub use error::LedgerError;
