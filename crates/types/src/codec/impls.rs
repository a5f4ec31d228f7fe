// Path: crates/types/src/codec/impls.rs

//! `Pack`/`Unpack` for the built-in value shapes.

use super::stream::{GrowableBuffer, ReadBuffer, WriteStream};
use super::varint::count_of;
use super::{expect_count, read_varint, write_varint, Pack, Unpack};
use crate::error::CodecError;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

// Fixed-width primitives: raw little-endian bytes, no length prefix.
macro_rules! primitive_impls {
    ($($ty:ty),+ $(,)?) => {$(
        impl Pack for $ty {
            fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
                s.write(&self.to_le_bytes())
            }
        }

        impl Unpack for $ty {
            fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
                Ok(<$ty>::from_le_bytes(s.read_array()?))
            }
        }
    )+};
}

primitive_impls!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Pack for bool {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        s.put(u8::from(*self))
    }
}

impl Unpack for bool {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        Ok(s.get()? != 0)
    }
}

impl Pack for str {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        write_varint(s, count_of(self.len())?)?;
        if !self.is_empty() {
            s.write(self.as_bytes())?;
        }
        Ok(())
    }
}

impl Pack for String {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        self.as_str().pack_to(s)
    }
}

impl Unpack for String {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        let len = read_varint(s)? as usize;
        let bytes = s.read(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}

impl<T: Pack> Pack for [T] {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        write_varint(s, count_of(self.len())?)?;
        for item in self {
            item.pack_to(s)?;
        }
        Ok(())
    }
}

impl<T: Pack> Pack for Vec<T> {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        self.as_slice().pack_to(s)
    }
}

impl<T: Unpack> Unpack for Vec<T> {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        let count = read_varint(s)? as usize;
        // Every element occupies at least one byte, so the remaining input bounds
        // the allocation even if the count is hostile.
        let mut items = Vec::with_capacity(count.min(s.remaining()));
        for _ in 0..count {
            items.push(T::unpack_from(s)?);
        }
        Ok(items)
    }
}

impl<T: Pack, const N: usize> Pack for [T; N] {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        write_varint(s, count_of(N)?)?;
        for item in self {
            item.pack_to(s)?;
        }
        Ok(())
    }
}

impl<T: Unpack, const N: usize> Unpack for [T; N] {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        let expected = count_of(N)?;
        expect_count(s, "fixed array", expected)?;
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::unpack_from(s)?);
        }
        items.try_into().map_err(|_| CodecError::SchemaMismatch {
            what: "fixed array",
            expected,
            got: expected,
        })
    }
}

impl<T: Pack> Pack for BTreeSet<T> {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        write_varint(s, count_of(self.len())?)?;
        for item in self {
            item.pack_to(s)?;
        }
        Ok(())
    }
}

impl<T: Unpack + Ord> Unpack for BTreeSet<T> {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        let count = read_varint(s)?;
        let mut set = BTreeSet::new();
        for _ in 0..count {
            set.insert(T::unpack_from(s)?);
        }
        Ok(set)
    }
}

/// Writes a count and then the already-packed entries in ascending byte order.
///
/// Hash containers iterate in hasher order, which differs between equal values.
/// Sorting the packed entries makes equal containers encode to equal bytes, so
/// they can serve as primary keys.
fn write_sorted<S: WriteStream + ?Sized>(
    s: &mut S,
    mut entries: Vec<Vec<u8>>,
) -> Result<(), CodecError> {
    entries.sort_unstable();
    write_varint(s, count_of(entries.len())?)?;
    for entry in &entries {
        s.write(entry)?;
    }
    Ok(())
}

impl<T: Pack, H> Pack for HashSet<T, H> {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        let entries = self
            .iter()
            .map(|item| {
                let mut buf = GrowableBuffer::default();
                item.pack_to(&mut buf)?;
                Ok(buf.into_inner())
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        write_sorted(s, entries)
    }
}

impl<T: Unpack + Eq + Hash, H: BuildHasher + Default> Unpack for HashSet<T, H> {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        let count = read_varint(s)?;
        let mut set = HashSet::with_hasher(H::default());
        for _ in 0..count {
            set.insert(T::unpack_from(s)?);
        }
        Ok(set)
    }
}

/// The per-pair arity marker every map entry carries.
const MAP_PAIR_ARITY: u32 = 2;

fn pack_pair<K: Pack, V: Pack, S: WriteStream + ?Sized>(
    s: &mut S,
    key: &K,
    value: &V,
) -> Result<(), CodecError> {
    write_varint(s, MAP_PAIR_ARITY)?;
    key.pack_to(s)?;
    value.pack_to(s)
}

fn unpack_pair<K: Unpack, V: Unpack>(s: &mut ReadBuffer<'_>) -> Result<(K, V), CodecError> {
    expect_count(s, "map pair", MAP_PAIR_ARITY)?;
    let key = K::unpack_from(s)?;
    let value = V::unpack_from(s)?;
    Ok((key, value))
}

impl<K: Pack, V: Pack> Pack for BTreeMap<K, V> {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        write_varint(s, count_of(self.len())?)?;
        for (key, value) in self {
            pack_pair(s, key, value)?;
        }
        Ok(())
    }
}

impl<K: Unpack + Ord, V: Unpack> Unpack for BTreeMap<K, V> {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        let count = read_varint(s)?;
        let mut map = BTreeMap::new();
        for _ in 0..count {
            let (key, value) = unpack_pair(s)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K: Pack, V: Pack, H> Pack for HashMap<K, V, H> {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        let entries = self
            .iter()
            .map(|(key, value)| {
                let mut buf = GrowableBuffer::default();
                pack_pair(&mut buf, key, value)?;
                Ok(buf.into_inner())
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        write_sorted(s, entries)
    }
}

impl<K: Unpack + Eq + Hash, V: Unpack, H: BuildHasher + Default> Unpack for HashMap<K, V, H> {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        let count = read_varint(s)?;
        let mut map = HashMap::with_hasher(H::default());
        for _ in 0..count {
            let (key, value) = unpack_pair(s)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl Pack for () {
    fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
        write_varint(s, 0)
    }
}

impl Unpack for () {
    fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
        expect_count(s, "tuple", 0)
    }
}

macro_rules! tuple_impls {
    ($( $arity:literal => ($($name:ident $idx:tt),+) )+) => {$(
        impl<$($name: Pack),+> Pack for ($($name,)+) {
            fn pack_to<S: WriteStream + ?Sized>(&self, s: &mut S) -> Result<(), CodecError> {
                write_varint(s, $arity)?;
                $( self.$idx.pack_to(s)?; )+
                Ok(())
            }
        }

        impl<$($name: Unpack),+> Unpack for ($($name,)+) {
            fn unpack_from(s: &mut ReadBuffer<'_>) -> Result<Self, CodecError> {
                expect_count(s, "tuple", $arity)?;
                Ok(($( $name::unpack_from(s)?, )+))
            }
        }
    )+};
}

tuple_impls! {
    1 => (A 0)
    2 => (A 0, B 1)
    3 => (A 0, B 1, C 2)
    4 => (A 0, B 1, C 2, D 3)
    5 => (A 0, B 1, C 2, D 3, E 4)
    6 => (A 0, B 1, C 2, D 3, E 4, F 5)
    7 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    8 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
    9 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8)
    10 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9)
    11 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10)
    12 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11)
}
