//! In-process ledger with allowance semantics.

use super::{Ledger, LedgerError};
use crate::core::{AccountId, Amount};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Book {
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl Book {
    fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Debit and credit in one step; nothing changes on error.
    fn move_funds(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.clone(),
                available,
                required: amount,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Rejected(format!("balance of '{to}' would overflow")))?;

        self.balances.insert(from.clone(), available - amount);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}

/// A mock fungible asset kept in memory.
///
/// Supports minting, approvals and both push and pull transfers. Intended
/// for tests, demos and simulations; it is not a token implementation.
///
/// ```rust
/// use swapgate::ledger::{InMemoryLedger, Ledger};
/// use swapgate::core::AccountId;
///
/// let ledger = InMemoryLedger::new();
/// let alice = AccountId::from("alice");
/// let gate = AccountId::from("gate");
///
/// ledger.mint(&alice, 100).unwrap();
/// ledger.approve(&alice, &gate, 10);
/// ledger.transfer_from(&gate, &alice, &gate, 10).unwrap();
///
/// assert_eq!(ledger.balance_of(&alice), 90);
/// assert_eq!(ledger.balance_of(&gate), 10);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    book: Mutex<Book>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air.
    pub fn mint(&self, account: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let mut book = self.book.lock();
        let credited = book
            .balance(account)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Rejected(format!("balance of '{account}' would overflow")))?;
        book.balances.insert(account.clone(), credited);
        Ok(())
    }

    /// Let `spender` pull up to `amount` from `owner`. Replaces any previous
    /// allowance.
    pub fn approve(&self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        self.book
            .lock()
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.book.lock().allowance(owner, spender)
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> Amount {
        self.book
            .lock()
            .balances
            .values()
            .fold(0, |acc, balance| acc.saturating_add(*balance))
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, account: &AccountId) -> Amount {
        self.book.lock().balance(account)
    }

    fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.book.lock().move_funds(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut book = self.book.lock();
        let allowed = book.allowance(from, spender);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: from.clone(),
                spender: spender.clone(),
                allowed,
                required: amount,
            });
        }
        book.move_funds(from, to, amount)?;
        book.allowances
            .insert((from.clone(), spender.clone()), allowed - amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> AccountId {
        AccountId::from(name)
    }

    #[test]
    fn mint_and_transfer() {
        let ledger = InMemoryLedger::new();
        ledger.mint(&id("alice"), 50).unwrap();

        ledger.transfer(&id("alice"), &id("bob"), 20).unwrap();

        assert_eq!(ledger.balance_of(&id("alice")), 30);
        assert_eq!(ledger.balance_of(&id("bob")), 20);
        assert_eq!(ledger.total_supply(), 50);
    }

    #[test]
    fn transfer_rejects_overdraft() {
        let ledger = InMemoryLedger::new();
        ledger.mint(&id("alice"), 5).unwrap();

        let err = ledger.transfer(&id("alice"), &id("bob"), 6).unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientBalance { available: 5, required: 6, .. }));
        assert_eq!(ledger.balance_of(&id("alice")), 5);
        assert_eq!(ledger.balance_of(&id("bob")), 0);
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let ledger = InMemoryLedger::new();
        ledger.mint(&id("alice"), 100).unwrap();
        ledger.approve(&id("alice"), &id("gate"), 30);

        ledger
            .transfer_from(&id("gate"), &id("alice"), &id("gate"), 10)
            .unwrap();

        assert_eq!(ledger.allowance(&id("alice"), &id("gate")), 20);
        assert_eq!(ledger.balance_of(&id("gate")), 10);
    }

    #[test]
    fn transfer_from_without_allowance_changes_nothing() {
        let ledger = InMemoryLedger::new();
        ledger.mint(&id("alice"), 100).unwrap();

        let err = ledger
            .transfer_from(&id("gate"), &id("alice"), &id("gate"), 10)
            .unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientAllowance { allowed: 0, .. }));
        assert_eq!(ledger.balance_of(&id("alice")), 100);
    }

    #[test]
    fn failed_pull_keeps_allowance() {
        let ledger = InMemoryLedger::new();
        ledger.mint(&id("alice"), 5).unwrap();
        ledger.approve(&id("alice"), &id("gate"), 10);

        let err = ledger
            .transfer_from(&id("gate"), &id("alice"), &id("gate"), 10)
            .unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.allowance(&id("alice"), &id("gate")), 10);
    }

    #[test]
    fn mint_overflow_is_rejected() {
        let ledger = InMemoryLedger::new();
        ledger.mint(&id("alice"), Amount::MAX).unwrap();

        assert!(matches!(
            ledger.mint(&id("alice"), 1),
            Err(LedgerError::Rejected(_))
        ));
    }
}
