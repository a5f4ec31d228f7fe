// Path: crates/types/src/codec/record.rs

//! Record reflection: the declarative surface a composite type exposes to the codec.
//!
//! The ordered field list is part of the wire contract. `#[derive(Record)]` in
//! `cosio-macros` implements these traits from the struct declaration, so the
//! field order is fixed at exactly one place.

use super::stream::{ReadBuffer, WriteStream};
use super::{expect_count, write_varint, Pack, Unpack};
use crate::error::CodecError;

/// A named composite type with an ordered field list and at most one base.
pub trait Record: Pack + Unpack {
    /// A stable type name. Used to name a record's default table; never written
    /// to the wire.
    const TYPE_NAME: &'static str;
    /// The record's own fields, in wire order. A base is not listed here.
    const FIELD_NAMES: &'static [&'static str];
    /// Whether the record derives from a base record.
    const HAS_BASE: bool;

    /// The field count written as the record's prefix: own fields, plus one for
    /// the base when there is one (the base counts as a single opaque field no
    /// matter how many fields it has itself).
    fn wire_field_count() -> u32 {
        Self::FIELD_NAMES.len() as u32 + u32::from(Self::HAS_BASE)
    }
}

/// A record derived from exactly one base record. The base is encoded first,
/// recursively, with its own field-count prefix.
pub trait Derived: Record {
    /// The base record type.
    type Base: Record;

    /// Returns the embedded base.
    fn base(&self) -> &Self::Base;

    /// Returns the embedded base mutably.
    fn base_mut(&mut self) -> &mut Self::Base;
}

/// A record stored in a table, keyed by the packed bytes of one of its fields.
pub trait PrimaryKey: Record {
    /// The type of the key field.
    type Key: Pack;

    /// Returns the current value of the key field.
    fn primary_key(&self) -> &Self::Key;
}

/// Writes the field-count prefix of `R`.
pub fn pack_record_header<R: Record, S: WriteStream + ?Sized>(
    s: &mut S,
) -> Result<(), CodecError> {
    write_varint(s, R::wire_field_count())
}

/// Reads the field-count prefix of `R`, failing with `SchemaMismatch` unless
/// it equals `R::wire_field_count()`.
pub fn unpack_record_header<R: Record>(s: &mut ReadBuffer<'_>) -> Result<(), CodecError> {
    expect_count(s, R::TYPE_NAME, R::wire_field_count())
}
