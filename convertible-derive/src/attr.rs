//! Attribute parsing for the derive macro.

use proc_macro2::Span;
use syn::{Attribute, Expr, ExprLit, Ident, Lit, Result, Type};

/// Parsed field attributes from `#[convertible(...)]`.
#[derive(Default)]
pub struct FieldAttrs {
    /// Wire name overriding the field identifier.
    pub rename: Option<String>,
    /// Whether to leave this field out of the record.
    pub skip: bool,
}

impl FieldAttrs {
    /// Parse attributes from a field.
    pub fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut result = FieldAttrs::default();

        for attr in attrs {
            if attr.path().is_ident("convertible") {
                result.parse_convertible_attr(attr)?;
            }
        }

        Ok(result)
    }

    fn parse_convertible_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: Expr = meta.value()?.parse()?;
                if let Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) = value
                {
                    let name = lit.value();
                    if name.is_empty() {
                        return Err(syn::Error::new_spanned(lit, "field name must not be empty"));
                    }
                    self.rename = Some(name);
                } else {
                    return Err(syn::Error::new_spanned(value, "expected string literal"));
                }
            } else if meta.path.is_ident("skip") {
                self.skip = true;
            } else {
                return Err(syn::Error::new_spanned(
                    meta.path,
                    "unknown convertible attribute",
                ));
            }
            Ok(())
        })
    }
}

/// Field information collected from the struct definition.
pub struct FieldInfo {
    pub ident: Ident,
    pub ty: Type,
    pub wire_name: String,
    pub skip: bool,
    pub span: Span,
}

/// Validate that wire names of encoded fields are unique.
pub fn validate_fields(fields: &[FieldInfo]) -> Result<()> {
    use std::collections::HashSet;

    let mut seen_names = HashSet::new();

    for field in fields {
        if field.skip {
            continue;
        }

        if !seen_names.insert(field.wire_name.as_str()) {
            return Err(syn::Error::new(
                field.span,
                format!("duplicate field name \"{}\" in struct", field.wire_name),
            ));
        }
    }

    Ok(())
}
