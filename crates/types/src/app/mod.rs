// Path: crates/types/src/app/mod.rs
//! Well-known value types shared by contracts and the host boundary.

/// Fixed-size hash blobs.
pub mod checksum;
/// Account and contract names.
pub mod name;

pub use checksum::{Checksum160, Checksum256, Checksum512};
pub use name::Name;

/// An amount of the chain's native coin.
pub type CoinAmount = u64;
