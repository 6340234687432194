use super::TypeConverter;
use crate::error::{Error, Result};
use crate::geometry::{Point2f, Rect};
use crate::value::ExternalValue;

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::geometry::Point2f {}
    impl Sealed for crate::geometry::Rect {}
}

/// Element types that may travel as an ordered collection
pub trait SequenceElement: TypeConverter + sealed::Sealed {
    /// Name used in error messages
    const NAME: &'static str;
}

impl SequenceElement for Point2f {
    const NAME: &'static str = "Point2f";
}

impl SequenceElement for Rect {
    const NAME: &'static str = "Rect";
}

impl<T: SequenceElement> TypeConverter for Vec<T> {
    fn to_external(&self) -> ExternalValue {
        ExternalValue::Array(self.iter().map(TypeConverter::to_external).collect())
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            Error::InvalidArgument(format!("expected {} array, got {}", T::NAME, value.kind()))
        })?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_external(item).map_err(|e| e.within(format!("[{}]", i))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ExternalObject;

    #[test]
    fn test_points_keep_order() {
        let points = vec![Point2f::new(3.0, 1.0), Point2f::new(0.5, 0.25), Point2f::new(-1.0, 9.0)];
        let back: Vec<Point2f> = Vec::from_external(&points.to_external()).unwrap();
        assert_eq!(back, points);
    }

    #[test]
    fn test_empty_sequence() {
        let back: Vec<Rect> = Vec::from_external(&ExternalValue::Array(vec![])).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_non_array_rejected() {
        let err = Vec::<Rect>::from_external(&ExternalObject::new().into()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: expected Rect array, got object");
    }

    #[test]
    fn test_bad_element_names_index() {
        let value = ExternalValue::Array(vec![Point2f::new(1.0, 2.0).to_external(), 4.into()]);
        let err = Vec::<Point2f>::from_external(&value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: [1]: expected Point object, got number"
        );
    }
}
