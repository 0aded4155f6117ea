//! Derive macro for convertible records.
//!
//! `#[derive(Convertible)]` on a struct with named fields implements both
//! `convertible::Element` and `convertible::Convertible`. The struct is
//! encoded as a record graph whose fields appear in declaration order.
//!
//! # Example
//!
//! ```rust,ignore
//! use convertible::Convertible;
//!
//! #[derive(Convertible, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     #[convertible(rename = "years")]
//!     age: u32,
//!     #[convertible(skip)]
//!     cached: Option<String>,
//! }
//!
//! let person = Person { name: "Alice".into(), age: 30, cached: None };
//! let bytes = person.to_bytes();
//! assert_eq!(Person::from_bytes(&bytes).unwrap(), person);
//! ```

mod attr;
mod expand;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for `Element` and `Convertible`.
///
/// # Attributes
///
/// - `#[convertible(rename = "name")]` - Field name written to the record schema.
/// - `#[convertible(skip)]` - Not encoded; decoded as `Default::default()`.
#[proc_macro_derive(Convertible, attributes(convertible))]
pub fn derive_convertible(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand::derive_convertible(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
