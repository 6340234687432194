//! Bidirectional converters between native values and `ExternalValue`
//!
//! One `TypeConverter` implementation per supported type:
//!
//! | Native type      | External shape                                       |
//! |------------------|------------------------------------------------------|
//! | `i32`, `i64`     | number (truncated on the way in)                     |
//! | `f64`            | number                                               |
//! | `bool`           | boolean                                              |
//! | `String`         | string                                               |
//! | `Point2f`        | `{x, y}` (narrowed to single precision)              |
//! | `Rect`           | `{x, y, width, height}`                              |
//! | `Size`           | `{width, height}`                                    |
//! | `Scalar`         | `[v0, v1, v2, v3]`, accepts a bare number or 1..=4   |
//! | `Mat`            | metadata object plus optional `data` buffer          |
//! | `Vec<Point2f>`   | array of points                                      |
//! | `Vec<Rect>`      | array of rects                                       |
//!
//! `to_external` never fails. `from_external` fails with
//! `Error::InvalidArgument` naming the field or shape that did not match.

mod geometry;
mod mat;
mod sequence;

pub use sequence::SequenceElement;

use crate::error::{Error, Result};
use crate::value::{ExternalObject, ExternalValue};

/// Conversion contract for a single native type
pub trait TypeConverter: Sized {
    /// Build the host-side representation
    fn to_external(&self) -> ExternalValue;

    /// Rebuild the native value, rejecting mismatched shapes
    fn from_external(value: &ExternalValue) -> Result<Self>;
}

/// Convert any supported native value to its host-side representation
pub fn to_external<T: TypeConverter>(value: &T) -> ExternalValue {
    value.to_external()
}

/// Convert a host-side value into the requested native type
pub fn from_external<T: TypeConverter>(value: &ExternalValue) -> Result<T> {
    T::from_external(value)
}

/// Host ToInt32 semantics: truncate, wrap modulo 2^32, non-finite -> 0
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    const TWO_32: f64 = 4_294_967_296.0;
    let wrapped = n.trunc().rem_euclid(TWO_32);
    if wrapped >= 2_147_483_648.0 {
        (wrapped - TWO_32) as i32
    } else {
        wrapped as i32
    }
}

/// Truncate to i64, saturating at the bounds; non-finite -> 0
pub fn to_int64(n: f64) -> i64 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc() as i64
}

fn expect_number(value: &ExternalValue, what: &str) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        Error::InvalidArgument(format!("expected {} number, got {}", what, value.kind()))
    })
}

/// Require an object, naming `what` in the error
pub(crate) fn expect_object<'a>(value: &'a ExternalValue, what: &str) -> Result<&'a ExternalObject> {
    value.as_object().ok_or_else(|| {
        Error::InvalidArgument(format!("expected {} object, got {}", what, value.kind()))
    })
}

/// Read a required numeric field
pub(crate) fn number_field(obj: &ExternalObject, field: &str, what: &str) -> Result<f64> {
    match obj.get(field) {
        None | Some(ExternalValue::Undefined) => Err(Error::InvalidArgument(format!(
            "{} is missing field '{}'",
            what, field
        ))),
        Some(ExternalValue::Number(n)) => Ok(*n),
        Some(other) => Err(Error::InvalidArgument(format!(
            "{} field '{}' must be a number, got {}",
            what,
            field,
            other.kind()
        ))),
    }
}

pub(crate) fn int_field(obj: &ExternalObject, field: &str, what: &str) -> Result<i32> {
    number_field(obj, field, what).map(to_int32)
}

impl TypeConverter for i32 {
    fn to_external(&self) -> ExternalValue {
        ExternalValue::Number(f64::from(*self))
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        expect_number(value, "int32").map(to_int32)
    }
}

impl TypeConverter for i64 {
    fn to_external(&self) -> ExternalValue {
        ExternalValue::Number(*self as f64)
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        expect_number(value, "int64").map(to_int64)
    }
}

impl TypeConverter for f64 {
    fn to_external(&self) -> ExternalValue {
        ExternalValue::Number(*self)
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        expect_number(value, "double")
    }
}

impl TypeConverter for bool {
    fn to_external(&self) -> ExternalValue {
        ExternalValue::Bool(*self)
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        value.as_bool().ok_or_else(|| {
            Error::InvalidArgument(format!("expected boolean, got {}", value.kind()))
        })
    }
}

impl TypeConverter for String {
    fn to_external(&self) -> ExternalValue {
        ExternalValue::String(self.clone())
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        value.as_str().map(str::to_string).ok_or_else(|| {
            Error::InvalidArgument(format!("expected string, got {}", value.kind()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_int32_truncates_and_wraps() {
        assert_eq!(to_int32(3.9), 3);
        assert_eq!(to_int32(-3.9), -3);
        assert_eq!(to_int32(f64::NAN), 0);
        assert_eq!(to_int32(f64::INFINITY), 0);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(4_294_967_297.0), 1);
        assert_eq!(to_int32(-2_147_483_649.0), i32::MAX);
    }

    #[test]
    fn test_to_int64() {
        assert_eq!(to_int64(-7.5), -7);
        assert_eq!(to_int64(f64::NEG_INFINITY), 0);
        assert_eq!(to_int64(1e300), i64::MAX);
    }

    #[test]
    fn test_primitive_round_trips() {
        assert_eq!(i32::from_external(&42.to_external()).unwrap(), 42);
        assert_eq!(f64::from_external(&0.1f64.to_external()).unwrap(), 0.1);
        assert_eq!(
            i64::from_external(&(1i64 << 40).to_external()).unwrap(),
            1i64 << 40
        );
        assert!(bool::from_external(&true.to_external()).unwrap());
        assert_eq!(
            String::from_external(&"lena.png".to_string().to_external()).unwrap(),
            "lena.png"
        );
    }

    #[test]
    fn test_primitive_kind_mismatch() {
        let err = i32::from_external(&ExternalValue::from("12")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref m) if m.contains("got string")));
        assert!(String::from_external(&ExternalValue::from(12)).is_err());
        assert!(bool::from_external(&ExternalValue::Null).is_err());
    }
}
