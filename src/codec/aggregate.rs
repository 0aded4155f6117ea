//! Sequences, sets and maps of any `Element`.
//!
//! Sets and maps reject payloads that repeat an element or key.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

use crate::error::{DecodeError, GraphError};
use crate::traits::{Convertible, Element};

use super::graph::{self, mismatch};
use super::reader::Reader;
use super::schema::{Field, Schema};
use super::wire::write_varint;

fn write_elements<'a, T, I>(out: &mut Vec<u8>, len: usize, iter: I)
where
    T: Element + 'a,
    I: Iterator<Item = &'a T>,
{
    write_varint(out, len as u64);
    for elem in iter {
        elem.encode_payload(out);
    }
}

fn write_entries<'a, K, V, I>(out: &mut Vec<u8>, len: usize, iter: I)
where
    K: Element + 'a,
    V: Element + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    write_varint(out, len as u64);
    for (key, value) in iter {
        key.encode_payload(out);
        value.encode_payload(out);
    }
}

/// Decode `count` elements under `elem`, handing each to `push`.
fn read_elements<T, F>(
    r: &mut Reader<'_>,
    elem: &Schema,
    mut push: F,
) -> Result<(), GraphError>
where
    T: Element,
    F: FnMut(usize, T) -> Result<(), GraphError>,
{
    r.enter()?;
    let count = r.read_count(elem.min_payload_len())?;
    for _ in 0..count {
        let value = T::decode_payload(r, elem)?;
        push(count, value)?;
    }
    r.leave();
    Ok(())
}

fn read_entries<K, V, F>(
    r: &mut Reader<'_>,
    key: &Schema,
    value: &Schema,
    mut push: F,
) -> Result<(), GraphError>
where
    K: Element,
    V: Element,
    F: FnMut(usize, K, V) -> Result<(), GraphError>,
{
    r.enter()?;
    let count = r.read_count(key.min_payload_len() + value.min_payload_len())?;
    for _ in 0..count {
        let k = K::decode_payload(r, key)?;
        let v = V::decode_payload(r, value)?;
        push(count, k, v)?;
    }
    r.leave();
    Ok(())
}

/// Resolve the field list of an encoded record of `T`.
///
/// Used by `#[derive(Convertible)]` implementations.
pub fn record_fields<'s, T: Element>(
    encoded: &'s Schema,
    len: usize,
) -> Result<&'s [Field], GraphError> {
    match encoded {
        Schema::Record(fields) if fields.len() == len => Ok(fields),
        other => Err(mismatch(&T::schema(), other)),
    }
}

// --- Ordered sequence ---

impl<T: Element> Element for Vec<T> {
    fn schema() -> Schema {
        Schema::seq(T::schema())
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        write_elements(out, self.len(), self.iter());
    }

    fn decode_payload(r: &mut Reader<'_>, encoded: &Schema) -> Result<Self, GraphError> {
        let Schema::Seq(elem) = encoded else {
            return Err(mismatch(&Self::schema(), encoded));
        };
        let cap = r.remaining();
        let mut out = Vec::new();
        read_elements::<T, _>(r, elem, |count, value| {
            if out.is_empty() {
                out.reserve(count.min(cap));
            }
            out.push(value);
            Ok(())
        })?;
        Ok(out)
    }
}

impl<T: Element> Convertible for Vec<T> {
    fn to_bytes(&self) -> Vec<u8> {
        graph::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(graph::from_bytes(bytes)?)
    }
}

// --- Unique sets ---

impl<T, S> Element for HashSet<T, S>
where
    T: Element + Eq + Hash,
    S: BuildHasher + Default,
{
    fn schema() -> Schema {
        Schema::set(T::schema())
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        write_elements(out, self.len(), self.iter());
    }

    fn decode_payload(r: &mut Reader<'_>, encoded: &Schema) -> Result<Self, GraphError> {
        let Schema::Set(elem) = encoded else {
            return Err(mismatch(&Self::schema(), encoded));
        };
        let mut out = HashSet::with_hasher(S::default());
        read_elements::<T, _>(r, elem, |_, value| {
            if out.insert(value) {
                Ok(())
            } else {
                Err(GraphError::DuplicateEntry("set element"))
            }
        })?;
        Ok(out)
    }
}

impl<T, S> Convertible for HashSet<T, S>
where
    T: Element + Eq + Hash,
    S: BuildHasher + Default,
{
    fn to_bytes(&self) -> Vec<u8> {
        graph::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(graph::from_bytes(bytes)?)
    }
}

impl<T: Element + Ord> Element for BTreeSet<T> {
    fn schema() -> Schema {
        Schema::set(T::schema())
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        write_elements(out, self.len(), self.iter());
    }

    fn decode_payload(r: &mut Reader<'_>, encoded: &Schema) -> Result<Self, GraphError> {
        let Schema::Set(elem) = encoded else {
            return Err(mismatch(&Self::schema(), encoded));
        };
        let mut out = BTreeSet::new();
        read_elements::<T, _>(r, elem, |_, value| {
            if out.insert(value) {
                Ok(())
            } else {
                Err(GraphError::DuplicateEntry("set element"))
            }
        })?;
        Ok(out)
    }
}

impl<T: Element + Ord> Convertible for BTreeSet<T> {
    fn to_bytes(&self) -> Vec<u8> {
        graph::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(graph::from_bytes(bytes)?)
    }
}

// --- Key-unique mappings ---

impl<K, V, S> Element for HashMap<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Default,
{
    fn schema() -> Schema {
        Schema::map(K::schema(), V::schema())
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        write_entries(out, self.len(), self.iter());
    }

    fn decode_payload(r: &mut Reader<'_>, encoded: &Schema) -> Result<Self, GraphError> {
        let Schema::Map(key, value) = encoded else {
            return Err(mismatch(&Self::schema(), encoded));
        };
        let mut out = HashMap::with_hasher(S::default());
        read_entries::<K, V, _>(r, key, value, |_, k, v| match out.insert(k, v) {
            None => Ok(()),
            Some(_) => Err(GraphError::DuplicateEntry("map key")),
        })?;
        Ok(out)
    }
}

impl<K, V, S> Convertible for HashMap<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Default,
{
    fn to_bytes(&self) -> Vec<u8> {
        graph::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(graph::from_bytes(bytes)?)
    }
}

impl<K: Element + Ord, V: Element> Element for BTreeMap<K, V> {
    fn schema() -> Schema {
        Schema::map(K::schema(), V::schema())
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        write_entries(out, self.len(), self.iter());
    }

    fn decode_payload(r: &mut Reader<'_>, encoded: &Schema) -> Result<Self, GraphError> {
        let Schema::Map(key, value) = encoded else {
            return Err(mismatch(&Self::schema(), encoded));
        };
        let mut out = BTreeMap::new();
        read_entries::<K, V, _>(r, key, value, |_, k, v| match out.insert(k, v) {
            None => Ok(()),
            Some(_) => Err(GraphError::DuplicateEntry("map key")),
        })?;
        Ok(out)
    }
}

impl<K: Element + Ord, V: Element> Convertible for BTreeMap<K, V> {
    fn to_bytes(&self) -> Vec<u8> {
        graph::to_bytes(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(graph::from_bytes(bytes)?)
    }
}
