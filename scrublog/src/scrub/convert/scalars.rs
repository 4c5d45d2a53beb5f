//! `Scrubbable` implementations for scalar-like types.

use std::borrow::Cow;
use std::marker::PhantomData;

use super::impl_scrubbable;
use crate::scrub::value::{Scalar, Value};

// Booleans and characters
impl_scrubbable!(bool, |v| Value::Scalar(Scalar::Bool(*v)));
impl_scrubbable!(char, |v| Value::Scalar(Scalar::Str(v.to_string())));

// Signed integers
impl_scrubbable!(i8, |v| Value::Scalar(Scalar::Int(i64::from(*v))));
impl_scrubbable!(i16, |v| Value::Scalar(Scalar::Int(i64::from(*v))));
impl_scrubbable!(i32, |v| Value::Scalar(Scalar::Int(i64::from(*v))));
impl_scrubbable!(i64, |v| Value::Scalar(Scalar::Int(*v)));
impl_scrubbable!(isize, |v| Value::Scalar(Scalar::Int(*v as i64)));

// Unsigned integers
impl_scrubbable!(u8, |v| Value::Scalar(Scalar::UInt(u64::from(*v))));
impl_scrubbable!(u16, |v| Value::Scalar(Scalar::UInt(u64::from(*v))));
impl_scrubbable!(u32, |v| Value::Scalar(Scalar::UInt(u64::from(*v))));
impl_scrubbable!(u64, |v| Value::Scalar(Scalar::UInt(*v)));
impl_scrubbable!(usize, |v| Value::Scalar(Scalar::UInt(*v as u64)));

// Floating point
impl_scrubbable!(f32, |v| Value::Scalar(Scalar::Float(f64::from(*v))));
impl_scrubbable!(f64, |v| Value::Scalar(Scalar::Float(*v)));

// Strings
impl_scrubbable!(str, |v| Value::Scalar(Scalar::Str(v.to_owned())));
impl_scrubbable!(String, |v| Value::Scalar(Scalar::Str(v.clone())));
impl_scrubbable!(Cow<'_, str>, |v| Value::Scalar(Scalar::Str(
    v.as_ref().to_owned()
)));

// Unit renders as an empty optional slot, matching a JSON null.
impl_scrubbable!((), |_v| Value::none());

impl<T> crate::scrub::convert::Scrubbable for PhantomData<T> {
    fn to_scrub_value(&self) -> Value {
        Value::none()
    }
}

#[cfg(test)]
mod tests {
    use crate::scrub::convert::Scrubbable;
    use crate::scrub::value::{Scalar, Value};

    #[test]
    fn integers_widen_without_loss() {
        assert_eq!(
            (-7_i8).to_scrub_value(),
            Value::Scalar(Scalar::Int(-7))
        );
        assert_eq!(
            (u64::MAX).to_scrub_value(),
            Value::Scalar(Scalar::UInt(u64::MAX))
        );
    }

    #[test]
    fn strings_convert_to_owned_scalars() {
        assert_eq!("x".to_scrub_value(), Value::scalar("x"));
        assert_eq!(String::from("x").to_scrub_value(), Value::scalar("x"));
        assert_eq!('x'.to_scrub_value(), Value::scalar("x"));
    }

    #[test]
    fn unit_is_an_empty_optional() {
        assert_eq!(().to_scrub_value(), Value::none());
    }
}
