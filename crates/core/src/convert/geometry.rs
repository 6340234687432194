use super::{expect_object, int_field, number_field, TypeConverter};
use crate::error::{Error, Result};
use crate::geometry::{Point2f, Rect, Scalar, Size};
use crate::value::{ExternalObject, ExternalValue};

impl TypeConverter for Point2f {
    fn to_external(&self) -> ExternalValue {
        ExternalObject::new()
            .with("x", f64::from(self.x))
            .with("y", f64::from(self.y))
            .into()
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        let obj = expect_object(value, "Point")?;
        // Points are single precision on the native side
        let x = number_field(obj, "x", "Point")? as f32;
        let y = number_field(obj, "y", "Point")? as f32;
        Ok(Point2f::new(x, y))
    }
}

impl TypeConverter for Rect {
    fn to_external(&self) -> ExternalValue {
        ExternalObject::new()
            .with("x", self.x)
            .with("y", self.y)
            .with("width", self.width)
            .with("height", self.height)
            .into()
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        let obj = expect_object(value, "Rect")?;
        Ok(Rect::new(
            int_field(obj, "x", "Rect")?,
            int_field(obj, "y", "Rect")?,
            int_field(obj, "width", "Rect")?,
            int_field(obj, "height", "Rect")?,
        ))
    }
}

impl TypeConverter for Size {
    fn to_external(&self) -> ExternalValue {
        ExternalObject::new()
            .with("width", self.width)
            .with("height", self.height)
            .into()
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        let obj = expect_object(value, "Size")?;
        Ok(Size::new(
            int_field(obj, "width", "Size")?,
            int_field(obj, "height", "Size")?,
        ))
    }
}

impl TypeConverter for Scalar {
    fn to_external(&self) -> ExternalValue {
        ExternalValue::Array(self.0.iter().map(|&v| ExternalValue::Number(v)).collect())
    }

    /// A bare number fills channel 0; an array fills channels in order.
    /// Missing channels default to 0 and anything past the fourth is ignored.
    fn from_external(value: &ExternalValue) -> Result<Self> {
        match value {
            ExternalValue::Number(v) => Ok(Scalar::from(*v)),
            ExternalValue::Array(items) if !items.is_empty() => {
                if items.len() > 4 {
                    tracing::trace!(len = items.len(), "Scalar array longer than 4, extra channels ignored");
                }
                let mut channels = [0.0; 4];
                for (i, item) in items.iter().take(4).enumerate() {
                    channels[i] = item.as_f64().ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "Scalar channel {} must be a number, got {}",
                            i,
                            item.kind()
                        ))
                    })?;
                }
                Ok(Scalar(channels))
            }
            other => Err(Error::InvalidArgument(format!(
                "expected Scalar array or number, got {}",
                match other {
                    ExternalValue::Array(_) => "empty array",
                    _ => other.kind(),
                }
            ))),
        }
    }
}
