// Path: crates/types/src/codec/varint.rs

//! Unsigned LEB128 varints, used exclusively as length and count prefixes.
//!
//! Each byte carries seven payload bits, least significant group first; the high
//! bit marks that another byte follows. Values are limited to 32 bits, so an
//! encoding is at most five bytes long. Encoding is canonical: no value is ever
//! written with redundant trailing continuation bytes.

use super::stream::{GrowableBuffer, ReadBuffer, WriteStream};
use super::{Pack, Unpack};
use crate::error::CodecError;

/// The longest possible encoding of a 32-bit value.
pub const MAX_VARINT_LEN: usize = 5;

/// A `u32` that packs as a varint rather than as four raw bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnsignedInt(pub u32);

impl From<u32> for UnsignedInt {
    fn from(v: u32) -> Self {
        UnsignedInt(v)
    }
}

impl From<UnsignedInt> for u32 {
    fn from(v: UnsignedInt) -> Self {
        v.0
    }
}

/// Returns the number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u32) -> usize {
    let mut v = value >> 7;
    let mut len = 1;
    while v != 0 {
        v >>= 7;
        len += 1;
    }
    len
}

/// Writes `value` to the stream as a varint.
pub fn write_varint<S: WriteStream + ?Sized>(s: &mut S, value: u32) -> Result<(), CodecError> {
    let mut v = value;
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            return s.put(byte);
        }
        s.put(byte | 0x80)?;
    }
}

/// Reads a varint from the stream.
///
/// Fails with `OutOfBounds` if the stream ends mid-value and with
/// `VarintOverflow` if the value does not fit in 32 bits.
pub fn read_varint(s: &mut ReadBuffer<'_>) -> Result<u32, CodecError> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = s.get()?;
        value |= u64::from(byte & 0x7f) << shift;
        if value > u64::from(u32::MAX) {
            return Err(CodecError::VarintOverflow);
        }
        if byte & 0x80 == 0 {
            return Ok(value as u32);
        }
        shift += 7;
        if shift >= 7 * MAX_VARINT_LEN as u32 {
            return Err(CodecError::VarintOverflow);
        }
    }
}

/// Encodes `value` into a fresh byte vector.
pub fn encode(value: u32) -> Result<Vec<u8>, CodecError> {
    let mut out = GrowableBuffer::with_capacity(encoded_len(value));
    write_varint(&mut out, value)?;
    Ok(out.into_inner())
}

/// Decodes a varint from the front of `bytes`, returning the value and the
/// number of bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), CodecError> {
    let mut rb = ReadBuffer::new(bytes);
    let value = read_varint(&mut rb)?;
    Ok((value, rb.tell()))
}

/// Converts a container length to a varint count, failing for lengths that do
/// not fit in 32 bits.
pub(crate) fn count_of(len: usize) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::VarintOverflow)
}

impl Pack for UnsignedInt {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        write_varint(s, self.0)
    }
}

impl Unpack for UnsignedInt {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        read_varint(s).map(UnsignedInt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::WriteBuffer;
    use proptest::prelude::*;

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0).unwrap(), vec![0x00]);
        assert_eq!(encode(1).unwrap(), vec![0x01]);
        assert_eq!(encode(127).unwrap(), vec![0x7f]);
        assert_eq!(encode(128).unwrap(), vec![0x80, 0x01]);
        assert_eq!(encode(300).unwrap(), vec![0xac, 0x02]);
        assert_eq!(encode(u32::MAX).unwrap(), vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn encode_matches_bounded_stream_writes() {
        for v in [0, 127, 128, 16_384, u32::MAX] {
            let mut out = [0u8; MAX_VARINT_LEN];
            let mut wb = WriteBuffer::new(&mut out);
            write_varint(&mut wb, v).unwrap();
            let len = wb.tell();
            assert_eq!(encode(v).unwrap(), out[..len].to_vec());
        }
    }

    #[test]
    fn decode_reports_consumed_bytes() {
        assert_eq!(decode(&[0xac, 0x02, 0xff]).unwrap(), (300, 2));
    }

    #[test]
    fn truncated_input_is_out_of_bounds() {
        let err = decode(&[0x80, 0x80]).unwrap_err();
        assert!(matches!(err, CodecError::OutOfBounds { .. }));
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn values_wider_than_32_bits_overflow() {
        assert_eq!(
            decode(&[0xff, 0xff, 0xff, 0xff, 0x1f]).unwrap_err(),
            CodecError::VarintOverflow
        );
        assert_eq!(
            decode(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]).unwrap_err(),
            CodecError::VarintOverflow
        );
    }

    proptest! {
        #[test]
        fn roundtrip_and_length_agree(v in any::<u32>()) {
            let bytes = encode(v).unwrap();
            prop_assert_eq!(bytes.len(), encoded_len(v));
            prop_assert_eq!(decode(&bytes).unwrap(), (v, bytes.len()));
            // Canonical: the final byte never carries a continuation bit and is
            // only zero for the value zero itself.
            let last = *bytes.last().unwrap();
            prop_assert_eq!(last & 0x80, 0);
            prop_assert!(last != 0 || v == 0);
        }
    }
}
