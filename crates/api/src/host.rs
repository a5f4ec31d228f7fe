// Path: crates/api/src/host.rs
//! Defines the `ChainHost` trait: everything a contract may ask of the chain
//! besides table storage.

use cosio_types::app::{Checksum256, CoinAmount, Name};
use cosio_types::error::ContractError;

/// Host queries and side effects available to a running contract.
///
/// The production implementation is provided by the node's VM bridge and is not
/// part of this workspace. Methods take `&self`; an implementation that mutates
/// (balances, the print log) does so through interior mutability.
pub trait ChainHost {
    /// The number of the block the call executes in.
    fn current_block_number(&self) -> u64;

    /// The block timestamp, in seconds since the Unix epoch.
    fn current_timestamp(&self) -> u64;

    /// The witness producing the current block.
    fn current_witness(&self) -> Name;

    /// Hashes `data` with SHA-256.
    fn sha256(&self, data: &[u8]) -> Checksum256;

    /// Fails unless the call carries the authority of `account`.
    fn require_auth(&self, account: &Name) -> Result<(), ContractError>;

    /// The native coin balance held by `account`.
    fn balance_of(&self, account: &Name) -> CoinAmount;

    /// Moves `amount` native coins from `from` to `to`.
    fn transfer(
        &self,
        from: &Name,
        to: &Name,
        amount: CoinAmount,
        memo: &str,
    ) -> Result<(), ContractError>;

    /// Appends a line to the call's debug output.
    fn print(&self, message: &str);
}
