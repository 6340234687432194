//! Image file reading and writing

use cvbridge_core::convert::to_int32;
use cvbridge_core::{CallArgs, Error, ExternalValue, Mat, Result, TypeConverter};

use crate::backend::{VisionBackend, IMREAD_COLOR};
use crate::registry::Handler;

pub(crate) const MODULE: &str = "imgcodecs";

pub(crate) const FUNCTIONS: &[(&str, Handler)] = &[("imread", imread), ("imwrite", imwrite)];

/// `imread(filename, flags = IMREAD_COLOR) -> Mat`
fn imread(backend: &dyn VisionBackend, args: &CallArgs) -> Result<ExternalValue> {
    const EXPECTED: &str = "imread expects a filename string";
    args.require(1, EXPECTED)?;
    let filename = args.expect_string(0, EXPECTED)?;
    let flags = to_int32(args.number_or(1, f64::from(IMREAD_COLOR)));

    let image = backend.imread(filename, flags)?;
    if image.is_empty() {
        return Err(Error::NativeLibrary(format!("Could not read image: {}", filename)));
    }

    tracing::debug!(filename, rows = image.rows(), cols = image.cols(), "image read");
    Ok(image.to_external())
}

/// `imwrite(filename, mat) -> bool`
fn imwrite(backend: &dyn VisionBackend, args: &CallArgs) -> Result<ExternalValue> {
    const EXPECTED: &str = "imwrite expects a filename string and a Mat object";
    args.require(2, EXPECTED)?;
    let filename = args.expect_string(0, EXPECTED)?;
    args.expect_object(1, EXPECTED)?;
    let image: Mat = args.convert(1)?;

    let written = backend.imwrite(filename, &image)?;
    Ok(ExternalValue::Bool(written))
}
