//! Derive macro for `scrublog`.
//!
//! This crate generates conversion code behind `#[derive(Scrubbable)]`. It:
//! - reads `#[scrub(...)]` field and variant attributes
//! - emits a `scrublog::Scrubbable` implementation building the value tree
//!
//! It does **not** define the tree or the scrubbing engine. Those live in the
//! main `scrublog` crate and run at logging time.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Result, parse_macro_input, spanned::Spanned};

mod attrs;
mod derive_enum;
mod derive_struct;
mod generics;

use attrs::reject_scrub_attrs;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_scrubbable_bounds;

/// Derives `scrublog::Scrubbable` for structs and enums.
///
/// The generated implementation borrows `self` and builds a fresh node of the
/// scrubbing tree: named structs become records, tuple structs become
/// sequences (newtype structs forward to their inner value), and enums use
/// external tagging: a unit variant becomes its name as a scalar, a data
/// variant becomes a one-entry mapping keyed by the variant name.
///
/// # Field Attributes
///
/// - **No annotation**: The field is converted with `Scrubbable` and appears
///   under its declared name.
///
/// - `#[scrub(rename = "name")]`: Sets the serialization alias. The alias is
///   the name the encoder emits and therefore the name scrubbing matches.
///
/// - `#[scrub(skip)]`: Excludes the member from output entirely. The field's
///   type does not need to implement `Scrubbable`.
///
/// - `#[scrub(embedded)]`: Marks the member as anonymous/embedded. Embedded
///   members are omitted from scrubbed output.
///
/// # Variant Attributes
///
/// - `#[scrub(rename = "name")]`: Renames the variant tag used for external
///   tagging.
///
/// Unions are rejected at compile time, as are `#[scrub(...)]` attributes on
/// the container itself.
#[proc_macro_derive(Scrubbable, attributes(scrub))]
pub fn derive_scrubbable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    reject_scrub_attrs(&attrs, "containers")?;

    let crate_root = crate_root();

    let output = match &data {
        Data::Struct(data) => derive_struct(data, &generics, &crate_root)?,
        Data::Enum(data) => derive_enum(data, &generics, &crate_root)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Scrubbable` cannot be derived for unions",
            ));
        }
    };

    let bounded_generics = add_scrubbable_bounds(generics, &output.used_generics, &crate_root);
    let (impl_generics, ty_generics, where_clause) = bounded_generics.split_for_impl();
    let body = &output.body;

    Ok(quote! {
        impl #impl_generics #crate_root::Scrubbable for #ident #ty_generics #where_clause {
            fn to_scrub_value(&self) -> #crate_root::Value {
                #body
            }
        }
    })
}

/// The conversion body plus the generic parameters that need `Scrubbable`
/// bounds because a walked field uses them.
pub(crate) struct DeriveOutput {
    pub(crate) body: TokenStream,
    pub(crate) used_generics: Vec<proc_macro2::Ident>,
}

/// Returns the token stream to reference the scrublog crate root.
///
/// Handles crate renaming (e.g., `my_log = { package = "scrublog", ... }`)
/// and internal usage (when the derive is used inside the scrublog crate
/// itself).
fn crate_root() -> TokenStream {
    match crate_name("scrublog") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::scrublog },
    }
}
