//! `Scrubbable` implementations for standard containers.
//!
//! Optional slots convert to [`Value::Optional`]; every list-like container
//! (vectors, slices, arrays, deques, sets, tuples) converts to
//! [`Value::Sequence`] in iteration order. Smart pointers forward to their
//! pointee: a `Box` is never empty, so unlike `Option` it does not introduce
//! an optional slot.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::Scrubbable;
use crate::scrub::value::Value;

// =============================================================================
// Optional slots
// =============================================================================

impl<T: Scrubbable> Scrubbable for Option<T> {
    fn to_scrub_value(&self) -> Value {
        Value::Optional(
            self.as_ref()
                .map(|inner| Box::new(inner.to_scrub_value())),
        )
    }
}

// =============================================================================
// Smart pointers
// =============================================================================

impl<T: Scrubbable + ?Sized> Scrubbable for Box<T> {
    fn to_scrub_value(&self) -> Value {
        (**self).to_scrub_value()
    }
}

impl<T: Scrubbable + ?Sized> Scrubbable for Rc<T> {
    fn to_scrub_value(&self) -> Value {
        (**self).to_scrub_value()
    }
}

impl<T: Scrubbable + ?Sized> Scrubbable for Arc<T> {
    fn to_scrub_value(&self) -> Value {
        (**self).to_scrub_value()
    }
}

// =============================================================================
// Sequences
// =============================================================================

fn sequence_of<'a, T, I>(items: I) -> Value
where
    T: Scrubbable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    Value::Sequence(items.into_iter().map(Scrubbable::to_scrub_value).collect())
}

impl<T: Scrubbable> Scrubbable for Vec<T> {
    fn to_scrub_value(&self) -> Value {
        sequence_of(self)
    }
}

impl<T: Scrubbable> Scrubbable for [T] {
    fn to_scrub_value(&self) -> Value {
        sequence_of(self)
    }
}

impl<T: Scrubbable, const N: usize> Scrubbable for [T; N] {
    fn to_scrub_value(&self) -> Value {
        sequence_of(self)
    }
}

impl<T: Scrubbable> Scrubbable for VecDeque<T> {
    fn to_scrub_value(&self) -> Value {
        sequence_of(self)
    }
}

impl<T: Scrubbable, S> Scrubbable for HashSet<T, S> {
    fn to_scrub_value(&self) -> Value {
        sequence_of(self)
    }
}

impl<T: Scrubbable> Scrubbable for BTreeSet<T> {
    fn to_scrub_value(&self) -> Value {
        sequence_of(self)
    }
}

// =============================================================================
// Tuples
// =============================================================================

macro_rules! impl_scrubbable_tuple {
    ($($idx:tt $name:ident),+) => {
        impl<$($name: Scrubbable),+> Scrubbable for ($($name,)+) {
            fn to_scrub_value(&self) -> Value {
                Value::Sequence(vec![$(self.$idx.to_scrub_value()),+])
            }
        }
    };
}

impl_scrubbable_tuple!(0 A);
impl_scrubbable_tuple!(0 A, 1 B);
impl_scrubbable_tuple!(0 A, 1 B, 2 C);
impl_scrubbable_tuple!(0 A, 1 B, 2 C, 3 D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_maps_to_optional_slot() {
        let empty: Option<i64> = None;
        assert_eq!(empty.to_scrub_value(), Value::none());
        assert_eq!(
            Some(1_i64).to_scrub_value(),
            Value::some(Value::scalar(1_i64))
        );
    }

    #[test]
    fn box_forwards_without_an_optional_slot() {
        assert_eq!(Box::new(1_i64).to_scrub_value(), Value::scalar(1_i64));
    }

    #[test]
    fn vectors_preserve_order() {
        let values = vec!["a", "b", "c"];
        assert_eq!(
            values.to_scrub_value(),
            Value::Sequence(vec![
                Value::scalar("a"),
                Value::scalar("b"),
                Value::scalar("c"),
            ])
        );
    }

    #[test]
    fn tuples_convert_to_sequences() {
        let pair = ("user", 42_u64);
        assert_eq!(
            pair.to_scrub_value(),
            Value::Sequence(vec![Value::scalar("user"), Value::scalar(42_u64)])
        );
    }
}
