// Path: crates/types/src/codec/stream.rs

//! Byte cursors used by the codec.
//!
//! There are three back-ends:
//!
//! - **Bounded** ([`ReadBuffer`] for decoding, [`WriteBuffer`] for encoding into a
//!   caller-provided slice): `start <= pos <= end` always holds and any operation
//!   that would break it fails with [`CodecError::OutOfBounds`].
//! - **Measuring** ([`SizeCounter`]): only advances a counter. It is used to
//!   pre-compute the exact packed size of a value and never touches memory. It
//!   does not implement reading.
//! - **Growable** ([`GrowableBuffer`]): a `Vec<u8>` allocated to the size the
//!   measuring pass reported and then written sequentially, once.
//!
//! The encoder is generic over [`WriteStream`], so the measuring and growable
//! passes execute the exact same sequence of logical writes.

use crate::error::CodecError;

/// The write side of a stream. Implemented by every back-end that can be
/// the target of a pack.
pub trait WriteStream {
    /// Writes `bytes` at the current position and advances past them.
    fn write(&mut self, bytes: &[u8]) -> Result<(), CodecError>;

    /// Writes a single byte.
    fn put(&mut self, byte: u8) -> Result<(), CodecError> {
        self.write(&[byte])
    }

    /// Advances the position by `n` bytes without writing anything meaningful.
    fn skip(&mut self, n: usize) -> Result<(), CodecError>;

    /// Returns the current position relative to the start of the stream.
    fn tell(&self) -> usize;

    /// Moves the position to `pos`, relative to the start of the stream.
    fn seek(&mut self, pos: usize) -> Result<(), CodecError>;

    /// Returns how many bytes can still be written before the end of the region.
    fn remaining(&self) -> usize;
}

fn out_of_bounds(op: &'static str, needed: usize, remaining: usize) -> CodecError {
    CodecError::OutOfBounds {
        op,
        needed,
        remaining,
    }
}

/// A bounded, read-only cursor over a byte slice. This is the only stream the
/// decoder reads from.
#[derive(Debug, Clone)]
pub struct ReadBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadBuffer<'a> {
    /// Creates a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Reads the next `n` bytes.
    pub fn read(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| out_of_bounds("read", n, remaining))?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| out_of_bounds("read", n, remaining))?;
        self.pos = end;
        Ok(bytes)
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Reads a single byte.
    pub fn get(&mut self) -> Result<u8, CodecError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or_else(|| out_of_bounds("get", 1, 0))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Skips `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        self.read(n).map(|_| ())
    }

    /// Returns the current position.
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Moves the position to `pos`. Seeking past the end fails and leaves the
    /// cursor unchanged.
    pub fn seek(&mut self, pos: usize) -> Result<(), CodecError> {
        if pos > self.data.len() {
            return Err(out_of_bounds("seek", pos, self.data.len()));
        }
        self.pos = pos;
        Ok(())
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

/// A bounded cursor that writes into a caller-provided mutable slice.
#[derive(Debug)]
pub struct WriteBuffer<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteBuffer<'a> {
    /// Creates a cursor positioned at the start of `data`.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl WriteStream for WriteBuffer<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let remaining = self.remaining();
        if bytes.len() > remaining {
            return Err(out_of_bounds("write", bytes.len(), remaining));
        }
        let end = self.pos + bytes.len();
        let target = self
            .data
            .get_mut(self.pos..end)
            .ok_or_else(|| out_of_bounds("write", bytes.len(), remaining))?;
        target.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn put(&mut self, byte: u8) -> Result<(), CodecError> {
        let slot = self
            .data
            .get_mut(self.pos)
            .ok_or_else(|| out_of_bounds("put", 1, 0))?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(out_of_bounds("skip", n, remaining));
        }
        self.pos += n;
        Ok(())
    }

    fn tell(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, pos: usize) -> Result<(), CodecError> {
        if pos > self.data.len() {
            return Err(out_of_bounds("seek", pos, self.data.len()));
        }
        self.pos = pos;
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

/// A measuring stream. Every write only advances the size counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeCounter {
    size: usize,
}

impl SizeCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes counted so far.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl WriteStream for SizeCounter {
    fn write(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.size += bytes.len();
        Ok(())
    }

    fn put(&mut self, _byte: u8) -> Result<(), CodecError> {
        self.size += 1;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        self.size += n;
        Ok(())
    }

    fn tell(&self) -> usize {
        self.size
    }

    fn seek(&mut self, pos: usize) -> Result<(), CodecError> {
        self.size = pos;
        Ok(())
    }

    fn remaining(&self) -> usize {
        0
    }
}

/// The pack target: a vector pre-sized by a measuring pass.
///
/// Writes past the pre-computed size still succeed (the vector grows), but
/// [`crate::codec::pack`] verifies afterwards that the measured and written
/// sizes agree.
#[derive(Debug, Clone, Default)]
pub struct GrowableBuffer {
    buf: Vec<u8>,
    pos: usize,
}

impl GrowableBuffer {
    /// Creates an empty buffer with exactly `capacity` bytes reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    /// Returns the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the stream and returns the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl WriteStream for GrowableBuffer {
    fn write(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let end = self.pos + bytes.len();
        if self.pos == self.buf.len() {
            self.buf.extend_from_slice(bytes);
        } else {
            if end > self.buf.len() {
                self.buf.resize(end, 0);
            }
            if let Some(target) = self.buf.get_mut(self.pos..end) {
                target.copy_from_slice(bytes);
            }
        }
        self.pos = end;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        let end = self.pos + n;
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.pos = end;
        Ok(())
    }

    fn tell(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, pos: usize) -> Result<(), CodecError> {
        if pos > self.buf.len() {
            return Err(out_of_bounds("seek", pos, self.buf.len()));
        }
        self.pos = pos;
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.buf.capacity().saturating_sub(self.pos)
    }
}
