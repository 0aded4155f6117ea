//! Self-describing graph format for aggregates.
//!
//! Every graph is `MAGIC VERSION schema payload`. The schema describes the
//! full static shape of the value, so an empty `Vec<i64>` still records that
//! its elements are `i64` and is rejected by a `Vec<String>` decoder.
//!
//! ```text
//! vec![1u8, 2, 3]  =>  c7 01 | 10 06 | 03 01 02 03
//!                      header  seq<u8>  count + elements
//! ```

pub mod wire;
pub mod schema;
pub mod reader;
pub mod graph;
pub mod aggregate;

pub use graph::{from_bytes, from_bytes_with_limits, peek_schema, to_bytes};
pub use reader::Reader;
pub use schema::{Field, Schema};
