//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in walked fields. Skipped
//! fields contribute nothing, and `PhantomData<T>` is exempt: it converts to
//! an empty optional slot without touching `T`, so `T` must not be required
//! to implement `Scrubbable`. This keeps patterns like
//!
//! ```ignore
//! #[derive(Scrubbable)]
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>, // T can be any external type
//! }
//! ```
//!
//! working even when `T` has no `Scrubbable` implementation.

use proc_macro2::TokenStream;
use syn::{Ident, parse_quote};

fn push_if_generic(ident: &Ident, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if generics.type_params().any(|param| param.ident == *ident)
        && !result.iter().any(|existing| existing == ident)
    {
        result.push(ident.clone());
    }
}

fn visit_path(path: &syn::Path, generics: &syn::Generics, result: &mut Vec<Ident>) {
    if let Some(last_segment) = path.segments.last() {
        if last_segment.ident == "PhantomData" {
            return;
        }
    }

    for segment in &path.segments {
        push_if_generic(&segment.ident, generics, result);
        if let syn::PathArguments::AngleBracketed(arguments) = &segment.arguments {
            for argument in &arguments.args {
                if let syn::GenericArgument::Type(inner) = argument {
                    visit_type(inner, generics, result);
                }
            }
        }
    }
}

fn visit_type(ty: &syn::Type, generics: &syn::Generics, result: &mut Vec<Ident>) {
    match ty {
        syn::Type::Path(type_path) => visit_path(&type_path.path, generics, result),
        syn::Type::Reference(reference) => visit_type(&reference.elem, generics, result),
        syn::Type::Slice(slice) => visit_type(&slice.elem, generics, result),
        syn::Type::Array(array) => visit_type(&array.elem, generics, result),
        syn::Type::Paren(paren) => visit_type(&paren.elem, generics, result),
        syn::Type::Group(group) => visit_type(&group.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for element in &tuple.elems {
                visit_type(element, generics, result);
            }
        }
        _ => {}
    }
}

/// Records the type parameters of `generics` that `ty` mentions.
pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    visit_type(ty, generics, result);
}

/// Adds `Scrubbable` bounds to generic parameters used by walked fields.
pub(crate) fn add_scrubbable_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    crate_root: &TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|used| used == &param.ident) {
            param.bounds.push(parse_quote!(#crate_root::Scrubbable));
        }
    }
    generics
}
