//! Value-transfer primitive over staged balances.

use credo_types::{Participant, Value};

use crate::state::StateWrite;
use crate::StoreError;

/// Move `amount` from `from` to `to` inside an open transaction.
///
/// Both balance updates are staged, so they commit with the rest of the call
/// or not at all.
pub fn transfer_value(
    txn: &mut dyn StateWrite,
    from: &Participant,
    to: &Participant,
    amount: Value,
) -> Result<(), StoreError> {
    let available = txn.balance(from)?;
    let debited = available
        .checked_sub(amount)
        .ok_or(StoreError::InsufficientBalance {
            needed: amount.raw(),
            available: available.raw(),
        })?;
    if from == to {
        return Ok(());
    }
    let credited = txn
        .balance(to)?
        .checked_add(amount)
        .ok_or_else(|| StoreError::BalanceOverflow(to.to_string()))?;
    txn.set_balance(from, debited)?;
    txn.set_balance(to, credited)?;
    Ok(())
}
