// Path: crates/types/src/prelude.rs

//! The names nearly every contract module imports: codec traits, `Name`, the
//! error taxonomy and the `required` shorthand.

pub use crate::app::Name;
pub use crate::codec::{pack, unpack, Pack, PrimaryKey, Record, Unpack};
pub use crate::error::{ensure, CodecError, ContractError, ErrorCode, StateError};

/// Turns a missing value into a specific error: `maybe.required(err)?`.
pub trait OptionExt<T> {
    /// `Ok(v)` for `Some(v)`, `Err(err)` for `None`.
    fn required<E>(self, err: E) -> Result<T, E>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required<E>(self, err: E) -> Result<T, E> {
        self.ok_or(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_maps_none_to_the_given_error() {
        let missing: Option<u8> = None;
        assert_eq!(
            missing.required(StateError::KeyNotFound("t".into())),
            Err(StateError::KeyNotFound("t".into()))
        );
        assert_eq!(Some(3u8).required(StateError::Unbound), Ok(3));
    }
}
