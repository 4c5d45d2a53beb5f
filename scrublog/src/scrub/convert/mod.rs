//! Conversion of caller types into the scrubbing tree.
//!
//! [`Scrubbable`] is the per-type adapter that turns an arbitrary value into
//! a [`Value`] before scrubbing runs. Implementations for scalars, strings,
//! and standard containers live here; `#[derive(Scrubbable)]` (from
//! `scrublog-derive`) generates implementations for user structs and enums.
//!
//! [`ScrubKey`] is the analogous adapter for map keys: it decides whether a
//! key is string-representable (and therefore matchable by name) or not.

mod containers;
mod maps;
mod scalars;

use super::value::{MapKey, Value};

// =============================================================================
// Scrubbable - conversion into the value tree
// =============================================================================

/// Converts a value into the scrubbing tree.
///
/// Conversion borrows the value: the original is never consumed or mutated,
/// and the resulting [`Value`] owns all of its data.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be converted into a scrubbing tree",
    label = "this type does not implement `Scrubbable`",
    note = "use `#[derive(Scrubbable)]` on the type definition",
    note = "or convert the value into a supported shape (scalar, Option, Vec, map, serde_json::Value)"
)]
pub trait Scrubbable {
    /// Returns this value as a node of the scrubbing tree.
    fn to_scrub_value(&self) -> Value;
}

impl<T: Scrubbable + ?Sized> Scrubbable for &T {
    fn to_scrub_value(&self) -> Value {
        (**self).to_scrub_value()
    }
}

impl<T: Scrubbable + ?Sized> Scrubbable for &mut T {
    fn to_scrub_value(&self) -> Value {
        (**self).to_scrub_value()
    }
}

// =============================================================================
// ScrubKey - conversion of map keys
// =============================================================================

/// Converts a map key into a [`MapKey`].
///
/// String-like keys become [`MapKey::Str`] and participate in field-name
/// matching; numeric and boolean keys keep their identity and are never
/// matched.
pub trait ScrubKey {
    /// Returns this key as a [`MapKey`].
    fn to_map_key(&self) -> MapKey;
}

impl<T: ScrubKey + ?Sized> ScrubKey for &T {
    fn to_map_key(&self) -> MapKey {
        (**self).to_map_key()
    }
}

// =============================================================================
// Implementation helper
// =============================================================================

macro_rules! impl_scrubbable {
    ($ty:ty, |$value:ident| $body:expr) => {
        impl crate::scrub::convert::Scrubbable for $ty {
            fn to_scrub_value(&self) -> crate::scrub::value::Value {
                let $value = self;
                $body
            }
        }
    };
}

pub(super) use impl_scrubbable;
