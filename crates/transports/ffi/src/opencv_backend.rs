//! OpenCV implementation of [`VisionBackend`]
//!
//! Pixels are copied in both directions: a `cvbridge_core::Mat` is copied
//! into a freshly allocated `cv::Mat` before a call, and the result is
//! copied back out. Non-continuous results (ROIs, padded rows) are cloned
//! into continuous storage first.
//!
//! Built against OpenCV 4.11+ bindings: the explicit-sigmaY blur path uses
//! the `AlgorithmHint` argument those versions added.

use cvbridge_core::{Error, Mat, MatType, Result, Size};
use opencv::core::{self as cv, AlgorithmHint, BORDER_DEFAULT};
use opencv::prelude::*;
use opencv::{imgcodecs, imgproc};

use crate::backend::{Version, VisionBackend};

#[derive(Debug, Default, Clone, Copy)]
pub struct OpenCvBackend;

fn native(err: opencv::Error) -> Error {
    Error::NativeLibrary(err.message)
}

fn to_cv_size(size: Size) -> cv::Size {
    cv::Size::new(size.width, size.height)
}

/// Copy a bridge Mat into a new OpenCV Mat
fn to_cv(mat: &Mat) -> Result<cv::Mat> {
    if mat.is_empty() {
        return Ok(cv::Mat::default());
    }

    let mut out = cv::Mat::new_rows_cols_with_default(
        mat.rows(),
        mat.cols(),
        mat.typ().code(),
        cv::Scalar::all(0.0),
    )
    .map_err(native)?;
    out.data_bytes_mut().map_err(native)?.copy_from_slice(mat.data());
    Ok(out)
}

/// Copy an OpenCV Mat out into a bridge Mat
fn from_cv(mat: &cv::Mat) -> Result<Mat> {
    if mat.empty() {
        return Ok(Mat::default());
    }
    if mat.dims() > 2 {
        return Err(Error::NativeLibrary(format!(
            "{}-dimensional Mat cannot cross the boundary",
            mat.dims()
        )));
    }

    let typ = MatType::from_code(mat.typ())?;
    let continuous;
    let src = if mat.is_continuous() {
        mat
    } else {
        continuous = mat.try_clone().map_err(native)?;
        &continuous
    };

    let bytes = src.data_bytes().map_err(native)?.to_vec();
    Mat::from_bytes(src.rows(), src.cols(), typ, bytes)
}

impl VisionBackend for OpenCvBackend {
    fn name(&self) -> &str {
        "opencv"
    }

    fn version(&self) -> Result<Version> {
        Ok((
            cv::get_version_major().map_err(native)?,
            cv::get_version_minor().map_err(native)?,
            cv::get_version_revision().map_err(native)?,
        ))
    }

    fn build_information(&self) -> Result<String> {
        cv::get_build_information().map_err(native)
    }

    fn num_threads(&self) -> Result<i32> {
        cv::get_num_threads().map_err(native)
    }

    fn set_num_threads(&self, threads: i32) -> Result<()> {
        cv::set_num_threads(threads).map_err(native)
    }

    fn tick_count(&self) -> Result<i64> {
        cv::get_tick_count().map_err(native)
    }

    fn tick_frequency(&self) -> Result<f64> {
        cv::get_tick_frequency().map_err(native)
    }

    fn imread(&self, filename: &str, flags: i32) -> Result<Mat> {
        let image = imgcodecs::imread(filename, flags).map_err(native)?;
        from_cv(&image)
    }

    fn imwrite(&self, filename: &str, image: &Mat) -> Result<bool> {
        let image = to_cv(image)?;
        imgcodecs::imwrite(filename, &image, &cv::Vector::<i32>::new()).map_err(native)
    }

    fn resize(&self, src: &Mat, dsize: Size, interpolation: i32) -> Result<Mat> {
        let src = to_cv(src)?;
        let mut dst = cv::Mat::default();
        imgproc::resize(&src, &mut dst, to_cv_size(dsize), 0.0, 0.0, interpolation).map_err(native)?;
        from_cv(&dst)
    }

    fn gaussian_blur(&self, src: &Mat, ksize: Size, sigma_x: f64, sigma_y: f64) -> Result<Mat> {
        let src = to_cv(src)?;
        let mut dst = cv::Mat::default();
        if sigma_y == 0.0 {
            imgproc::gaussian_blur_def(&src, &mut dst, to_cv_size(ksize), sigma_x).map_err(native)?;
        } else {
            imgproc::gaussian_blur(
                &src,
                &mut dst,
                to_cv_size(ksize),
                sigma_x,
                sigma_y,
                BORDER_DEFAULT,
                AlgorithmHint::ALGO_HINT_DEFAULT,
            )
            .map_err(native)?;
        }
        from_cv(&dst)
    }

    fn cvt_color(&self, src: &Mat, code: i32) -> Result<Mat> {
        let src = to_cv(src)?;
        let mut dst = cv::Mat::default();
        imgproc::cvt_color_def(&src, &mut dst, code).map_err(native)?;
        from_cv(&dst)
    }
}
