//! Serde integration through the dynamic [`Value`] tree.
//!
//! Any `Serialize` type maps onto a `Value` and from there onto a graph.
//! Structs become records, sequences and tuples become `seq<any>`, maps
//! become `map<any, any>`. `None` struct fields are omitted and unit enum
//! variants are written as their name.
//!
//! # Example
//!
//! ```rust
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let person = Person { name: "Alice".into(), age: 30 };
//!
//! let bytes = convertible::serde::to_bytes(&person).unwrap();
//! let decoded: Person = convertible::serde::from_bytes(&bytes).unwrap();
//! assert_eq!(person, decoded);
//! ```

mod de;
mod error;
mod ser;

pub use de::ValueDeserializer;
pub use error::SerdeError;
pub use ser::ValueSerializer;

use serde::{Deserialize, Serialize};

use crate::traits::Convertible;
use crate::value::Value;

/// Serialize a value to graph bytes.
pub fn to_bytes<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>, SerdeError> {
    Ok(to_value(value)?.to_bytes())
}

/// Deserialize a value from graph bytes.
///
/// Accepts any well-formed graph, including those written by typed
/// `Convertible` implementations.
pub fn from_bytes<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, SerdeError> {
    let value = Value::from_bytes(data)?;
    from_value(&value)
}

/// Serialize a value to `Value` without encoding to bytes.
pub fn to_value<T: ?Sized + Serialize>(value: &T) -> Result<Value, SerdeError> {
    ValueSerializer::serialize(value)
}

/// Deserialize a `Value` to a Rust type.
pub fn from_value<T: for<'de> Deserialize<'de>>(value: &Value) -> Result<T, SerdeError> {
    ValueDeserializer::deserialize(value)
}
