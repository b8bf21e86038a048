//! Per-caller marker for gated swaps in flight.

use crate::core::AccountId;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Identities with a venue call in flight.
///
/// The mark is per caller, not gate-wide. A venue may still start a gated
/// swap for a different identity while one is in flight; that swap passes
/// through its own admission check and holds no gate lock, so it cannot see
/// or disturb the outer caller's admission. A gate-wide mark would instead
/// serialise unrelated traders' swaps.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    accounts: Mutex<HashSet<AccountId>>,
}

impl InFlight {
    /// Mark `account` as having a venue call in flight.
    ///
    /// Returns `None` when it already has one. The mark is cleared when the
    /// returned guard drops, including on unwind.
    pub(crate) fn enter(&self, account: &AccountId) -> Option<InFlightGuard<'_>> {
        if !self.accounts.lock().insert(account.clone()) {
            return None;
        }
        Some(InFlightGuard {
            owner: self,
            account: account.clone(),
        })
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, account: &AccountId) -> bool {
        self.accounts.lock().contains(account)
    }
}

pub(crate) struct InFlightGuard<'a> {
    owner: &'a InFlight,
    account: AccountId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.accounts.lock().remove(&self.account);
    }
}
