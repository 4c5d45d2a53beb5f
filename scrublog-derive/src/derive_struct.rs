//! Struct-specific `Scrubbable` derivation.
//!
//! Named structs become records whose members carry the serialization
//! metadata from `#[scrub(...)]` attributes. The named-field codegen is
//! shared with struct-like enum variants.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, quote_spanned};
use syn::{DataStruct, Fields, Index, Result, spanned::Spanned};

use crate::{
    DeriveOutput,
    attrs::{parse_field_options, reject_scrub_attrs},
    generics::collect_generics_from_type,
};

/// How generated code reaches a named field: as a struct member off `self`,
/// or as a pattern binding inside a match arm.
pub(crate) enum FieldAccess {
    SelfMember,
    Binding,
}

pub(crate) struct NamedFieldsOutput {
    /// A block expression evaluating to `Value::Record(...)`.
    pub(crate) record_expr: TokenStream,
    /// Pattern bindings for match arms (`name`, or `name: _` for skipped
    /// members). Unused for struct derivation.
    pub(crate) bindings: Vec<TokenStream>,
}

pub(crate) fn named_fields_record(
    fields: &syn::FieldsNamed,
    generics: &syn::Generics,
    used_generics: &mut Vec<Ident>,
    crate_root: &TokenStream,
    access: &FieldAccess,
) -> Result<NamedFieldsOutput> {
    let mut statements = Vec::new();
    let mut bindings = Vec::new();

    for field in &fields.named {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        let ident = field
            .ident
            .clone()
            .expect("named field should have an identifier");
        let name = ident.to_string();

        if options.skip {
            // Skipped members carry no value; the field type needs no
            // Scrubbable impl and contributes no generic bounds.
            statements.push(quote_spanned! { span =>
                __scrub_fields.push(#crate_root::Field::skipped(#name));
            });
            bindings.push(quote! { #ident: _ });
            continue;
        }

        collect_generics_from_type(&field.ty, generics, used_generics);
        bindings.push(quote! { #ident });

        let accessor = match access {
            FieldAccess::SelfMember => quote! { &self.#ident },
            FieldAccess::Binding => quote! { #ident },
        };
        let mut constructor = quote_spanned! { span =>
            #crate_root::Field::new(#name, #crate_root::Scrubbable::to_scrub_value(#accessor))
        };
        if let Some(rename) = &options.rename {
            constructor = quote! { #constructor.with_alias(#rename) };
        }
        if options.embedded {
            constructor = quote! { #constructor.embedded() };
        }
        statements.push(quote! { __scrub_fields.push(#constructor); });
    }

    let capacity = fields.named.len();
    // The local is prefixed so a variant binding named `fields` cannot
    // shadow it inside match arms.
    let record_expr = quote! {{
        let mut __scrub_fields = ::std::vec::Vec::with_capacity(#capacity);
        #(#statements)*
        #crate_root::Value::Record(__scrub_fields)
    }};

    Ok(NamedFieldsOutput {
        record_expr,
        bindings,
    })
}

pub(crate) fn derive_struct(
    data: &DataStruct,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used_generics = Vec::new();

    let body = match &data.fields {
        Fields::Named(fields) => {
            named_fields_record(
                fields,
                generics,
                &mut used_generics,
                crate_root,
                &FieldAccess::SelfMember,
            )?
            .record_expr
        }
        Fields::Unnamed(fields) => {
            for field in &fields.unnamed {
                reject_scrub_attrs(&field.attrs, "tuple struct fields")?;
                collect_generics_from_type(&field.ty, generics, &mut used_generics);
            }
            if fields.unnamed.len() == 1 {
                // Newtype structs forward to their inner value.
                quote! { #crate_root::Scrubbable::to_scrub_value(&self.0) }
            } else {
                let elements = fields.unnamed.iter().enumerate().map(|(index, field)| {
                    let index = Index::from(index);
                    quote_spanned! { field.span() =>
                        #crate_root::Scrubbable::to_scrub_value(&self.#index)
                    }
                });
                quote! { #crate_root::Value::Sequence(::std::vec![#(#elements),*]) }
            }
        }
        Fields::Unit => quote! { #crate_root::Value::none() },
    };

    Ok(DeriveOutput {
        body,
        used_generics,
    })
}
