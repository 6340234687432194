//! `Mat` <-> external object
//!
//! Outgoing shape:
//!
//! ```text
//! { rows, cols, channels, type, depth, dims, empty, elemSize, step, data? }
//! ```
//!
//! `data` is present only for non-empty arrays and is a byte-for-byte copy
//! of the row-major storage. On the way in only `rows`, `cols` and `type`
//! are read; the rest of the metadata is derived from them.

use super::{expect_object, int_field, TypeConverter};
use crate::error::{Error, Result};
use crate::mat::{Mat, MatType};
use crate::value::{ExternalObject, ExternalValue};

impl TypeConverter for Mat {
    fn to_external(&self) -> ExternalValue {
        let mut obj = ExternalObject::with_capacity(10)
            .with("rows", self.rows())
            .with("cols", self.cols())
            .with("channels", self.channels())
            .with("type", self.typ().code())
            .with("depth", self.depth().code())
            .with("dims", self.dims())
            .with("empty", self.is_empty())
            .with("elemSize", self.elem_size() as f64)
            .with("step", self.step() as f64);

        if !self.is_empty() {
            tracing::trace!(
                rows = self.rows(),
                cols = self.cols(),
                bytes = self.data().len(),
                "copying Mat payload to external buffer"
            );
            obj.insert("data", ExternalValue::Buffer(self.data().to_vec()));
        }

        obj.into()
    }

    fn from_external(value: &ExternalValue) -> Result<Self> {
        let obj = expect_object(value, "Mat")?;

        let rows = int_field(obj, "rows", "Mat")?;
        let cols = int_field(obj, "cols", "Mat")?;
        let typ = MatType::from_code(int_field(obj, "type", "Mat")?)?;

        let mut mat = Mat::new(rows, cols, typ)?;

        match obj.get("data") {
            None | Some(ExternalValue::Undefined) => {}
            Some(ExternalValue::Buffer(bytes)) => {
                let storage = mat.data_mut();
                if bytes.len() > storage.len() {
                    return Err(Error::InvalidArgument(format!(
                        "Mat data of {} bytes exceeds {}x{} type {} storage of {} bytes",
                        bytes.len(),
                        rows,
                        cols,
                        typ.code(),
                        storage.len()
                    )));
                }
                if bytes.len() < storage.len() {
                    tracing::warn!(
                        provided = bytes.len(),
                        expected = storage.len(),
                        "Mat data shorter than its shape, remaining bytes left zeroed"
                    );
                }
                storage[..bytes.len()].copy_from_slice(bytes);
            }
            Some(other) => {
                return Err(Error::InvalidArgument(format!(
                    "Mat field 'data' must be a buffer, got {}",
                    other.kind()
                )))
            }
        }

        Ok(mat)
    }
}
