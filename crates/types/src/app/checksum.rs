// Path: crates/types/src/app/checksum.rs

//! Fixed-size hash blobs.

use crate::codec::{expect_count, write_varint, Pack, ReadBuffer, Unpack, WriteStream};
use crate::error::CodecError;
use std::fmt;

macro_rules! checksum_type {
    ($(#[$doc:meta])* $name:ident, $len:literal) => {
        $(#[$doc])*
        ///
        /// Packs as a varint equal to the byte length followed by the raw bytes;
        /// unpacking asserts the length.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// The fixed byte length of this checksum kind.
            pub const LEN: usize = $len;

            /// Returns the raw hash bytes.
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $len])
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl Pack for $name {
            fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
                write_varint(s, $len)?;
                s.write(&self.0)
            }
        }

        impl Unpack for $name {
            fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
                expect_count(s, stringify!($name), $len)?;
                Ok(Self(s.read_array()?))
            }
        }
    };
}

checksum_type!(
    /// A 20-byte checksum (e.g. RIPEMD-160).
    Checksum160,
    20
);
checksum_type!(
    /// A 32-byte checksum (e.g. SHA-256).
    Checksum256,
    32
);
checksum_type!(
    /// A 64-byte checksum (e.g. SHA-512).
    Checksum512,
    64
);
