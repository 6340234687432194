//! Geometric transforms, filtering and color conversion

use cvbridge_core::convert::to_int32;
use cvbridge_core::{CallArgs, ExternalValue, Mat, Result, Size, TypeConverter};

use crate::backend::{VisionBackend, INTER_LINEAR};
use crate::registry::Handler;

pub(crate) const MODULE: &str = "imgproc";

pub(crate) const FUNCTIONS: &[(&str, Handler)] = &[
    ("resize", resize),
    ("gaussianBlur", gaussian_blur),
    ("cvtColor", cvt_color),
];

/// `resize(mat, dsize, interpolation = INTER_LINEAR) -> Mat`
fn resize(backend: &dyn VisionBackend, args: &CallArgs) -> Result<ExternalValue> {
    const EXPECTED: &str = "resize expects a Mat object and a Size object";
    args.require(2, EXPECTED)?;
    args.expect_object(0, EXPECTED)?;
    args.expect_object(1, EXPECTED)?;

    let src: Mat = args.convert(0)?;
    let dsize: Size = args.convert(1)?;
    let interpolation = to_int32(args.number_or(2, f64::from(INTER_LINEAR)));

    Ok(backend.resize(&src, dsize, interpolation)?.to_external())
}

/// `gaussianBlur(mat, ksize, sigmaX, sigmaY = 0) -> Mat`
fn gaussian_blur(backend: &dyn VisionBackend, args: &CallArgs) -> Result<ExternalValue> {
    const EXPECTED: &str = "gaussianBlur expects a Mat object, a Size object and a number";
    args.require(3, EXPECTED)?;
    args.expect_object(0, EXPECTED)?;
    args.expect_object(1, EXPECTED)?;
    let sigma_x = args.expect_number(2, EXPECTED)?;

    let src: Mat = args.convert(0)?;
    let ksize: Size = args.convert(1)?;
    // 0 lets the native library derive sigmaY from sigmaX
    let sigma_y = args.number_or(3, 0.0);

    Ok(backend.gaussian_blur(&src, ksize, sigma_x, sigma_y)?.to_external())
}

/// `cvtColor(mat, code) -> Mat`
fn cvt_color(backend: &dyn VisionBackend, args: &CallArgs) -> Result<ExternalValue> {
    const EXPECTED: &str = "cvtColor expects a Mat object and a number";
    args.require(2, EXPECTED)?;
    args.expect_object(0, EXPECTED)?;
    let code = to_int32(args.expect_number(1, EXPECTED)?);

    let src: Mat = args.convert(0)?;
    Ok(backend.cvt_color(&src, code)?.to_external())
}
