//! Enum-specific `Scrubbable` derivation.
//!
//! Enums convert with external tagging, so variant names are ordinary keys
//! the scrubber can match:
//!
//! - unit variants become the variant name as a scalar;
//! - newtype variants become `{ "Name": <inner> }`;
//! - tuple variants become `{ "Name": [<elements>] }`;
//! - struct variants become `{ "Name": <record> }`.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{DataEnum, Fields, Result, spanned::Spanned};

use crate::{
    DeriveOutput,
    attrs::{parse_variant_rename, reject_scrub_attrs},
    derive_struct::{FieldAccess, named_fields_record},
    generics::collect_generics_from_type,
};

pub(crate) fn derive_enum(
    data: &DataEnum,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used_generics = Vec::new();

    if data.variants.is_empty() {
        // An uninhabited enum cannot be constructed; the match is vacuous.
        return Ok(DeriveOutput {
            body: quote! { match *self {} },
            used_generics,
        });
    }

    let mut arms = Vec::new();
    for variant in &data.variants {
        let variant_ident = &variant.ident;
        let tag = parse_variant_rename(&variant.attrs)?
            .unwrap_or_else(|| variant_ident.to_string());

        let arm = match &variant.fields {
            Fields::Unit => quote! {
                Self::#variant_ident => #crate_root::Value::scalar(#tag)
            },
            Fields::Unnamed(fields) => {
                for field in &fields.unnamed {
                    reject_scrub_attrs(&field.attrs, "tuple variant fields")?;
                    collect_generics_from_type(&field.ty, generics, &mut used_generics);
                }
                let bindings: Vec<Ident> = (0..fields.unnamed.len())
                    .map(|index| format_ident!("field_{index}"))
                    .collect();
                let payload = if bindings.len() == 1 {
                    let binding = &bindings[0];
                    quote_spanned! { fields.span() =>
                        #crate_root::Scrubbable::to_scrub_value(#binding)
                    }
                } else {
                    quote_spanned! { fields.span() =>
                        #crate_root::Value::Sequence(::std::vec![
                            #(#crate_root::Scrubbable::to_scrub_value(#bindings)),*
                        ])
                    }
                };
                quote! {
                    Self::#variant_ident ( #(#bindings),* ) => #crate_root::Value::Mapping(
                        ::std::vec![(#crate_root::MapKey::from(#tag), #payload)],
                    )
                }
            }
            Fields::Named(fields) => {
                let output = named_fields_record(
                    fields,
                    generics,
                    &mut used_generics,
                    crate_root,
                    &FieldAccess::Binding,
                )?;
                let record_expr = &output.record_expr;
                let bindings = &output.bindings;
                quote! {
                    Self::#variant_ident { #(#bindings),* } => #crate_root::Value::Mapping(
                        ::std::vec![(#crate_root::MapKey::from(#tag), #record_expr)],
                    )
                }
            }
        };
        arms.push(arm);
    }

    Ok(DeriveOutput {
        body: quote! {
            match self {
                #(#arms),*
            }
        },
        used_generics,
    })
}
