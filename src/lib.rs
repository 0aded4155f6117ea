//! Convertible: round-trip binary conversion for plain data.
//!
//! Every supported value converts to a byte sequence and back through the
//! [`Convertible`] trait. Scalars use fixed little-endian layouts, text is
//! UTF-8, timestamps are f64 seconds since the Unix epoch, and aggregates
//! (sequences, sets, maps, records) use a self-describing graph that
//! carries its own schema.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use convertible::Convertible;
//!
//! assert_eq!(42i64.to_bytes(), [0x2a, 0, 0, 0, 0, 0, 0, 0]);
//! assert_eq!(String::from_bytes(b"hello").unwrap(), "hello");
//!
//! let scores: HashMap<String, Vec<u32>> =
//!     [("ada".to_string(), vec![9, 7])].into_iter().collect();
//! let bytes = scores.to_bytes();
//! assert_eq!(HashMap::<String, Vec<u32>>::from_bytes(&bytes).unwrap(), scores);
//!
//! // The graph remembers its element types.
//! assert!(HashMap::<String, Vec<i64>>::from_bytes(&bytes).is_err());
//! ```

pub mod error;
pub mod limits;
pub mod traits;
pub mod scalar;
pub mod text;
pub mod raw;
pub mod timestamp;
pub mod codec;
pub mod value;

#[cfg(feature = "serde")]
pub mod serde;

pub use bytes::Bytes;
pub use codec::Schema;
pub use error::{DecodeError, GraphError};
pub use limits::DecodeLimits;
pub use timestamp::EpochOffset;
pub use traits::{Convertible, Element};
pub use value::Value;

// Re-export derive macro when the feature is enabled
#[cfg(feature = "derive")]
pub use convertible_derive::Convertible;

/// Decode a graph with explicit limits, for input from untrusted sources.
///
/// ```rust
/// use convertible::{from_bytes_with_limits, Convertible, DecodeLimits};
///
/// let bytes = vec![vec![1u8]].to_bytes();
/// let limits = DecodeLimits { max_depth: 1, ..DecodeLimits::default() };
/// assert!(from_bytes_with_limits::<Vec<Vec<u8>>>(&bytes, limits).is_err());
/// ```
pub fn from_bytes_with_limits<T: Element>(
    bytes: &[u8],
    limits: DecodeLimits,
) -> Result<T, DecodeError> {
    Ok(codec::from_bytes_with_limits(bytes, limits)?)
}
