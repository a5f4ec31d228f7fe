// Path: crates/types/src/codec/mod.rs

//! Defines the canonical binary wire format for all contract state and call arguments.
//!
//! The format is deliberately simple and only minimally self-describing:
//!
//! - primitives are written as their raw little-endian bytes,
//! - strings and sequences carry a varint length prefix,
//! - maps carry a varint count and a legacy `2` arity marker per pair,
//! - tuples, fixed arrays and checksums carry their (statically known) arity,
//! - records carry their field count, with a derived record counting its base
//!   as one extra field.
//!
//! Those counts are the format's only schema check. Decoding asserts each of
//! them and fails with [`CodecError::SchemaMismatch`] on disagreement, which
//! catches gross type confusion (decoding a three-field record as a five-field
//! one) but not field-level confusion.
//!
//! Encoding runs twice over the same rules: once against a [`SizeCounter`] to
//! learn the exact size, then against a [`GrowableBuffer`] reserved to that
//! size.

use crate::error::CodecError;

mod impls;
mod record;
pub mod stream;
pub mod varint;


pub use record::{
    pack_record_header, unpack_record_header, Derived, PrimaryKey, Record,
};
pub use stream::{GrowableBuffer, ReadBuffer, SizeCounter, WriteBuffer, WriteStream};
pub use varint::{read_varint, write_varint, UnsignedInt};

/// Raw packed bytes.
pub type Bytes = Vec<u8>;

/// A value that can be written to the wire.
///
/// There are deliberately no implementations for references, `Box`, `Rc` or
/// `Option`: attempting to pack one fails to compile.
pub trait Pack {
    /// Writes the value's encoding to `s`.
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError>;
}

/// A value that can be read back from the wire.
pub trait Unpack: Sized {
    /// Reads one value from `s`, advancing past its encoding.
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError>;
}

/// Returns the exact number of bytes `value` packs to, without allocating.
pub fn pack_size<T: Pack + ?Sized>(value: &T) -> Result<usize, CodecError> {
    let mut counter = SizeCounter::new();
    value.pack_to(&mut counter)?;
    Ok(counter.size())
}

/// Packs `value` into a newly allocated vector of exactly `pack_size(value)` bytes.
pub fn pack<T: Pack + ?Sized>(value: &T) -> Result<Bytes, CodecError> {
    let size = pack_size(value)?;
    let mut buf = GrowableBuffer::with_capacity(size);
    value.pack_to(&mut buf)?;
    let written = buf.tell();
    if written != size {
        // A `Pack` impl that writes differently in the two passes would corrupt
        // every length prefix computed from `pack_size`.
        return Err(CodecError::SchemaMismatch {
            what: "pack size",
            expected: varint::count_of(size)?,
            got: varint::count_of(written)?,
        });
    }
    Ok(buf.into_inner())
}

/// Packs `value` into `out` through a bounded stream, returning the number of
/// bytes written. Fails with `OutOfBounds` if `out` is too small.
pub fn pack_into<T: Pack + ?Sized>(value: &T, out: &mut [u8]) -> Result<usize, CodecError> {
    let mut wb = WriteBuffer::new(out);
    value.pack_to(&mut wb)?;
    Ok(wb.tell())
}

/// Unpacks a `T` from `bytes`, requiring that the whole input is consumed.
pub fn unpack<T: Unpack>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut rb = ReadBuffer::new(bytes);
    let value = T::unpack_from(&mut rb)?;
    match rb.remaining() {
        0 => Ok(value),
        n => Err(CodecError::TrailingBytes(n)),
    }
}

/// Reads a varint count and asserts it equals `expected`.
pub fn expect_count(
    s: &mut ReadBuffer<'_>,
    what: &'static str,
    expected: u32,
) -> Result<(), CodecError> {
    let got = read_varint(s)?;
    if got != expected {
        return Err(CodecError::SchemaMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}
