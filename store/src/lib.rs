//! State storage for Credo.
//!
//! Components never touch storage directly: they receive a store handle at
//! construction and stage their writes through [`StateWrite`] inside a
//! [`StateStore::transact`] call. Every call commits all of its writes or none.
//!
//! [`MemoryStore`] is the in-process stand-in for the execution environment's
//! ledger state: a single-writer store that serializes transactions.

pub mod error;
pub mod memory;
pub mod state;
pub mod value;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use state::{StateRead, StateStore, StateWrite};
pub use value::transfer_value;
