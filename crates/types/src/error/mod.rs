// Path: crates/types/src/error/mod.rs
//! Core error types for the Cosio contract data layer.
//!
//! Every error here is fatal to the call that raised it: the executor discards
//! the call's write set and nothing is persisted. There is no retry layer.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while packing or unpacking wire bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A stream operation would have moved the cursor outside its bounded region.
    #[error("Stream bounds violation during {op}: needed {needed} byte(s), {remaining} remaining")]
    OutOfBounds {
        /// The stream operation that failed (`read`, `write`, `put`, `get`, `seek`, `skip`).
        op: &'static str,
        /// The number of bytes the operation required.
        needed: usize,
        /// The number of bytes left before the end of the region.
        remaining: usize,
    },
    /// A decoded count (record fields, array length, tuple arity, blob length,
    /// map pair marker) disagrees with the statically expected value.
    #[error("Schema mismatch unpacking {what}: expected {expected}, got {got}")]
    SchemaMismatch {
        /// The shape being decoded.
        what: &'static str,
        /// The count the target type requires.
        expected: u32,
        /// The count found on the wire.
        got: u32,
    },
    /// The input contained bytes beyond what the target type consumed.
    #[error("{0} trailing byte(s) after unpacking")]
    TrailingBytes(usize),
    /// A varint carried more than 32 bits of payload.
    #[error("Varint overflows 32 bits")]
    VarintOverflow,
    /// A string field was not valid UTF-8.
    #[error("Invalid UTF-8 in string field")]
    InvalidUtf8,
    /// An enum discriminant read from the wire names no variant.
    #[error("Invalid discriminant {value} for enum {what}")]
    InvalidDiscriminant {
        /// The enum type being decoded.
        what: &'static str,
        /// The raw discriminant value.
        value: i128,
    },
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "CODEC_OUT_OF_BOUNDS",
            Self::SchemaMismatch { .. } => "CODEC_SCHEMA_MISMATCH",
            Self::TrailingBytes(_) => "CODEC_TRAILING_BYTES",
            Self::VarintOverflow => "CODEC_VARINT_OVERFLOW",
            Self::InvalidUtf8 => "CODEC_INVALID_UTF8",
            Self::InvalidDiscriminant { .. } => "CODEC_INVALID_DISCRIMINANT",
        }
    }
}

/// Errors related to table and raw storage access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The requested key was not found in the table or storage slot.
    #[error("Key not found in table '{0}'")]
    KeyNotFound(String),
    /// An error occurred in the key-value backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// An external table was used before `bind` gave it a location.
    #[error("External table is not bound to a contract")]
    Unbound,
    /// A name that must identify a contract identified a plain account.
    #[error("Name '{0}' is not a contract name")]
    NotAContract(String),
    /// The operation was denied on a key.
    #[error("Permission denied for state key: {0}")]
    PermissionDenied(String),
    /// A packed value exceeds the configured per-write limit.
    #[error("Value of {got} bytes exceeds the record limit of {limit}")]
    ValueTooLarge {
        /// The configured limit.
        limit: usize,
        /// The size of the rejected value.
        got: usize,
    },
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::KeyNotFound(_) => "STATE_KEY_NOT_FOUND",
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::Unbound => "STATE_TABLE_UNBOUND",
            Self::NotAContract(_) => "STATE_NOT_A_CONTRACT",
            Self::PermissionDenied(_) => "STATE_PERMISSION_DENIED",
            Self::ValueTooLarge { .. } => "STATE_VALUE_TOO_LARGE",
        }
    }
}

/// The error every contract call funnels into. Any variant aborts the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// Malformed wire bytes.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    /// A storage failure.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// The dispatcher received a method name with no matching handler.
    #[error("Unknown contract method: {0}")]
    UnknownMethod(String),
    /// A contract-level assertion failed.
    #[error("Assertion failed: {0}")]
    Assertion(String),
    /// The raw argument buffer exceeds the configured limit.
    #[error("Call arguments too large: {got} bytes exceeds limit of {limit}")]
    ArgsTooLarge {
        /// The configured limit.
        limit: usize,
        /// The size of the rejected buffer.
        got: usize,
    },
}

impl ErrorCode for ContractError {
    fn code(&self) -> &'static str {
        match self {
            Self::Codec(e) => e.code(),
            Self::State(e) => e.code(),
            Self::UnknownMethod(_) => "CONTRACT_UNKNOWN_METHOD",
            Self::Assertion(_) => "CONTRACT_ASSERTION_FAILED",
            Self::ArgsTooLarge { .. } => "CONTRACT_ARGS_TOO_LARGE",
        }
    }
}

impl From<String> for ContractError {
    fn from(s: String) -> Self {
        ContractError::Assertion(s)
    }
}

impl From<&str> for ContractError {
    fn from(s: &str) -> Self {
        ContractError::Assertion(s.to_string())
    }
}

/// The single assert-or-abort primitive.
///
/// Returns `ContractError::Assertion(what)` when `pred` is false, so callers can
/// write `ensure(balance >= amount, "balance not enough")?`.
pub fn ensure(pred: bool, what: impl Into<String>) -> Result<(), ContractError> {
    if pred {
        Ok(())
    } else {
        Err(ContractError::Assertion(what.into()))
    }
}

/// Aborts the current call with an assertion error unless the condition holds.
///
/// The message accepts `format!` arguments and is only built on failure.
#[macro_export]
macro_rules! cosio_assert {
    ($pred:expr, $($msg:tt)+) => {
        if !($pred) {
            return Err($crate::error::ContractError::Assertion(format!($($msg)+)).into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guarded(amount: u64) -> Result<u64, ContractError> {
        cosio_assert!(amount > 0, "amount must be positive, got {}", amount);
        Ok(amount)
    }

    #[test]
    fn ensure_passes_and_fails() {
        assert!(ensure(true, "unused").is_ok());
        let err = ensure(false, "balance not enough").unwrap_err();
        assert_eq!(err, ContractError::Assertion("balance not enough".into()));
        assert_eq!(err.code(), "CONTRACT_ASSERTION_FAILED");
    }

    #[test]
    fn assert_macro_formats_message() {
        assert_eq!(guarded(3).unwrap(), 3);
        assert_eq!(
            guarded(0).unwrap_err(),
            ContractError::Assertion("amount must be positive, got 0".into())
        );
    }

    #[test]
    fn nested_codes_surface() {
        let err: ContractError = CodecError::TrailingBytes(2).into();
        assert_eq!(err.code(), "CODEC_TRAILING_BYTES");
        let err: ContractError = StateError::Unbound.into();
        assert_eq!(err.code(), "STATE_TABLE_UNBOUND");
    }
}
