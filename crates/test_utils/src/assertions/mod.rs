//! Assertion utilities for codec and contract tests

use cosio_types::codec::{pack, pack_size, unpack, Pack, Unpack};
use std::fmt::Debug;

/// Packs `value`, checks the measured size against the packed length, unpacks
/// the bytes and compares. Returns the packed bytes for further inspection.
pub fn round_trip<T>(value: &T) -> anyhow::Result<Vec<u8>>
where
    T: Pack + Unpack + PartialEq + Debug,
{
    let bytes = pack(value)?;
    let size = pack_size(value)?;
    anyhow::ensure!(
        size == bytes.len(),
        "pack_size {} != packed length {}",
        size,
        bytes.len()
    );
    let back: T = unpack(&bytes)?;
    anyhow::ensure!(&back == value, "round trip changed {:?} into {:?}", value, back);
    Ok(bytes)
}

/// Assert that a value survives pack/unpack unchanged, yielding its bytes
#[macro_export]
macro_rules! assert_round_trip {
    ($value:expr) => {
        match $crate::assertions::round_trip(&$value) {
            Ok(bytes) => bytes,
            Err(err) => panic!("round trip failed: {:#}", err),
        }
    };
}

/// Assert that packing a value yields exactly the given hex string
#[macro_export]
macro_rules! assert_packs_to {
    ($value:expr, $hex:expr) => {
        match $crate::cosio_types::codec::pack(&$value) {
            Ok(bytes) => assert_eq!($crate::hex::encode(&bytes), $hex),
            Err(err) => panic!("pack failed: {:?}", err),
        }
    };
}

/// Assert that a contract call aborted with an error matching the pattern
#[macro_export]
macro_rules! assert_aborted {
    ($expr:expr, $pat:pat) => {
        match $expr {
            Ok(val) => panic!("Expected the call to abort, got Ok: {:?}", val),
            Err(err) => assert!(
                matches!(err, $pat),
                "unexpected abort reason: {:?}",
                err
            ),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn round_trip_returns_bytes() {
        let mut m = BTreeMap::new();
        m.insert(1u8, "a".to_string());
        let bytes = assert_round_trip!(m);
        assert_eq!(bytes, vec![1, 2, 1, 1, b'a']);
        assert_packs_to!(7u16, "0700");
    }

    #[test]
    fn aborted_matches_pattern() {
        let r: Result<(), cosio_types::error::ContractError> =
            Err(cosio_types::error::ContractError::UnknownMethod("x".into()));
        assert_aborted!(r, cosio_types::error::ContractError::UnknownMethod(_));
    }
}
