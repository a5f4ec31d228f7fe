// Path: crates/test_utils/src/host.rs
//! A scriptable `ChainHost` for tests.

use cosio_api::host::ChainHost;
use cosio_types::app::{Checksum256, CoinAmount, Name};
use cosio_types::error::{ContractError, StateError};
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// An in-memory host: fixed block data, an explicit set of authorized
/// accounts, native coin balances and a captured print log.
///
/// Balances and the print log change through `&self`, as the `ChainHost`
/// contract requires.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    block_number: u64,
    timestamp: u64,
    witness: Name,
    authorized: BTreeSet<Name>,
    balances: RefCell<BTreeMap<Name, CoinAmount>>,
    printed: RefCell<Vec<String>>,
}

impl MockHost {
    /// A host at block 1, timestamp 0, with no authorized accounts.
    pub fn new() -> Self {
        Self {
            block_number: 1,
            witness: Name::new("initminer"),
            ..Self::default()
        }
    }

    /// Sets the current block number and timestamp.
    pub fn with_block(mut self, block_number: u64, timestamp: u64) -> Self {
        self.block_number = block_number;
        self.timestamp = timestamp;
        self
    }

    /// Sets the current witness.
    pub fn with_witness(mut self, witness: impl Into<Name>) -> Self {
        self.witness = witness.into();
        self
    }

    /// Lets calls pass `require_auth` for `account`.
    pub fn authorize(mut self, account: impl Into<Name>) -> Self {
        self.authorized.insert(account.into());
        self
    }

    /// Drops every authorization and lets only `account` pass `require_auth`.
    pub fn authorize_only(mut self, account: impl Into<Name>) -> Self {
        self.authorized.clear();
        self.authorized.insert(account.into());
        self
    }

    /// Credits `account` with `amount` native coins.
    pub fn with_balance(self, account: impl Into<Name>, amount: CoinAmount) -> Self {
        self.balances.borrow_mut().insert(account.into(), amount);
        self
    }

    /// Everything printed so far, one entry per `print` call.
    pub fn printed(&self) -> Vec<String> {
        self.printed.borrow().clone()
    }
}

impl ChainHost for MockHost {
    fn current_block_number(&self) -> u64 {
        self.block_number
    }

    fn current_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn current_witness(&self) -> Name {
        self.witness.clone()
    }

    fn sha256(&self, data: &[u8]) -> Checksum256 {
        Checksum256(Sha256::digest(data).into())
    }

    fn require_auth(&self, account: &Name) -> Result<(), ContractError> {
        if self.authorized.contains(account) {
            Ok(())
        } else {
            Err(StateError::PermissionDenied(format!("missing authority of {account}")).into())
        }
    }

    fn balance_of(&self, account: &Name) -> CoinAmount {
        self.balances.borrow().get(account).copied().unwrap_or(0)
    }

    fn transfer(
        &self,
        from: &Name,
        to: &Name,
        amount: CoinAmount,
        _memo: &str,
    ) -> Result<(), ContractError> {
        let mut balances = self.balances.borrow_mut();
        let have = balances.get(from).copied().unwrap_or(0);
        let left = have
            .checked_sub(amount)
            .ok_or_else(|| ContractError::Assertion(format!("{from} balance not enough")))?;
        balances.insert(from.clone(), left);
        let credited = balances.entry(to.clone()).or_insert(0);
        *credited = credited.saturating_add(amount);
        Ok(())
    }

    fn print(&self, message: &str) {
        self.printed.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_vector() {
        let host = MockHost::new();
        assert_eq!(
            hex::encode(host.sha256(b"abc").as_bytes()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn auth_is_explicit() {
        let host = MockHost::new().authorize("alice");
        assert!(host.require_auth(&Name::new("alice")).is_ok());
        assert!(matches!(
            host.require_auth(&Name::new("bob")).unwrap_err(),
            ContractError::State(StateError::PermissionDenied(_))
        ));
    }

    #[test]
    fn authorize_only_replaces_the_set() {
        let host = MockHost::new().authorize("alice").authorize_only("bob");
        assert!(host.require_auth(&Name::new("alice")).is_err());
        assert!(host.require_auth(&Name::new("bob")).is_ok());
    }

    #[test]
    fn transfer_moves_coins() {
        let host = MockHost::new().with_balance("alice", 10);
        let (alice, bob) = (Name::new("alice"), Name::new("bob"));
        host.transfer(&alice, &bob, 4, "").unwrap();
        assert_eq!(host.balance_of(&alice), 6);
        assert_eq!(host.balance_of(&bob), 4);
        assert!(host.transfer(&bob, &alice, 5, "").is_err());
        assert_eq!(host.balance_of(&bob), 4);
    }

    #[test]
    fn print_is_captured() {
        let host = MockHost::new();
        host.print("hello");
        assert_eq!(host.printed(), vec!["hello".to_string()]);
    }
}
