//! `#[scrub(...)]` attribute parsing.
//!
//! Fields accept `rename = "..."`, `skip`, and `embedded`; variants accept
//! `rename = "..."` only. Anything else is rejected with a pointed error so
//! typos never silently change what gets scrubbed.

use syn::{Attribute, LitStr, Result};

#[derive(Default)]
pub(crate) struct FieldOptions {
    pub(crate) rename: Option<String>,
    pub(crate) skip: bool,
    pub(crate) embedded: bool,
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("scrub") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("embedded") {
                options.embedded = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported `scrub` attribute; expected `rename = \"...\"`, `skip`, or `embedded`",
                ))
            }
        })?;
    }

    if options.skip && (options.rename.is_some() || options.embedded) {
        let attr = attrs
            .iter()
            .find(|attr| attr.path().is_ident("scrub"))
            .expect("a `scrub` attribute produced the conflicting options");
        return Err(syn::Error::new_spanned(
            attr,
            "`#[scrub(skip)]` cannot be combined with other `scrub` options",
        ));
    }
    if options.embedded && options.rename.is_some() {
        let attr = attrs
            .iter()
            .find(|attr| attr.path().is_ident("scrub"))
            .expect("a `scrub` attribute produced the conflicting options");
        return Err(syn::Error::new_spanned(
            attr,
            "embedded members are omitted from output; `rename` has no effect",
        ));
    }

    Ok(options)
}

pub(crate) fn parse_variant_rename(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut rename = None;

    for attr in attrs {
        if !attr.path().is_ident("scrub") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("variants only support `#[scrub(rename = \"...\")]`"))
            }
        })?;
    }

    Ok(rename)
}

/// Rejects any `#[scrub(...)]` attribute in `attrs`. Used for positions where
/// the attribute has no meaning (containers, tuple fields).
pub(crate) fn reject_scrub_attrs(attrs: &[Attribute], position: &str) -> Result<()> {
    if let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("scrub")) {
        return Err(syn::Error::new_spanned(
            attr,
            format!("`#[scrub(...)]` is not supported on {position}"),
        ));
    }
    Ok(())
}
