//! Code generation for `#[derive(Convertible)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DeriveInput, Fields, GenericParam, Generics, Result};

use crate::attr::{validate_fields, FieldAttrs, FieldInfo};

/// Generate the `Element` and `Convertible` implementations for a struct.
pub fn derive_convertible(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Convertible only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Convertible only supports structs",
            ))
        }
    };

    let mut infos = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = FieldAttrs::from_attrs(&field.attrs)?;
        let wire_name = attrs.rename.unwrap_or_else(|| unraw(&ident));
        infos.push(FieldInfo {
            span: ident.span(),
            ident,
            ty: field.ty.clone(),
            wire_name,
            skip: attrs.skip,
        });
    }
    validate_fields(&infos)?;

    let encoded: Vec<&FieldInfo> = infos.iter().filter(|f| !f.skip).collect();
    let field_count = encoded.len();

    let schema_fields = encoded.iter().map(|f| {
        let wire_name = &f.wire_name;
        let ty = &f.ty;
        quote! {
            ::convertible::codec::Field::new(
                #wire_name,
                <#ty as ::convertible::Element>::schema(),
            )
        }
    });

    let field_writes = encoded.iter().map(|f| {
        let ident = &f.ident;
        quote! {
            ::convertible::Element::encode_payload(&self.#ident, out);
        }
    });

    // Encoded fields are read in wire order; skipped ones fall back to Default.
    let field_reads = encoded.iter().enumerate().map(|(i, f)| {
        let local = local_ident(i);
        let ty = &f.ty;
        quote! {
            let #local = <#ty as ::convertible::Element>::decode_payload(r, &fields[#i].schema)?;
        }
    });

    let mut next_local = 0;
    let field_inits = infos.iter().map(|f| {
        let ident = &f.ident;
        if f.skip {
            quote! { #ident: ::std::default::Default::default() }
        } else {
            let local = local_ident(next_local);
            next_local += 1;
            quote! { #ident: #local }
        }
    });

    let generics = add_element_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::convertible::Element for #name #ty_generics #where_clause {
            fn schema() -> ::convertible::Schema {
                ::convertible::Schema::Record(::std::vec![#(#schema_fields),*])
            }

            fn encode_payload(&self, out: &mut ::std::vec::Vec<u8>) {
                #(#field_writes)*
            }

            #[allow(unused_variables)]
            fn decode_payload(
                r: &mut ::convertible::codec::Reader<'_>,
                encoded: &::convertible::Schema,
            ) -> ::std::result::Result<Self, ::convertible::GraphError> {
                let fields = ::convertible::codec::aggregate::record_fields::<Self>(encoded, #field_count)?;
                r.enter()?;
                #(#field_reads)*
                r.leave();
                ::std::result::Result::Ok(Self {
                    #(#field_inits),*
                })
            }
        }

        impl #impl_generics ::convertible::Convertible for #name #ty_generics #where_clause {
            fn to_bytes(&self) -> ::std::vec::Vec<u8> {
                ::convertible::codec::to_bytes(self)
            }

            fn from_bytes(bytes: &[u8]) -> ::std::result::Result<Self, ::convertible::DecodeError> {
                ::std::result::Result::Ok(::convertible::codec::from_bytes(bytes)?)
            }
        }
    })
}

/// Require `Element` on every type parameter.
fn add_element_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(parse_quote!(::convertible::Element));
        }
    }
    generics
}

fn local_ident(index: usize) -> syn::Ident {
    quote::format_ident!("__field{}", index)
}

/// Field name without a leading `r#`.
fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}
