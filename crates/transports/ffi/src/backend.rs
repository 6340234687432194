//! Vision backend abstraction
//!
//! Handlers never touch the native library directly. They go through
//! [`VisionBackend`], so the registry can be driven by OpenCV in the addon
//! and by a recording mock in tests.

use cvbridge_core::{Error, Mat, Result, Size};

/// `cv::IMREAD_COLOR`
pub const IMREAD_COLOR: i32 = 1;

/// `cv::INTER_LINEAR`
pub const INTER_LINEAR: i32 = 1;

/// Native library version as (major, minor, revision)
pub type Version = (i32, i32, i32);

/// Operations the exported functions need from the native library
///
/// Implementations report native failures as `Error::NativeLibrary` with
/// the library's own message.
pub trait VisionBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    fn version(&self) -> Result<Version>;

    /// Build configuration summary as printed by the native library
    fn build_information(&self) -> Result<String>;

    fn num_threads(&self) -> Result<i32>;

    fn set_num_threads(&self, threads: i32) -> Result<()>;

    /// Ticks elapsed since an arbitrary native epoch
    fn tick_count(&self) -> Result<i64>;

    /// Ticks per second
    fn tick_frequency(&self) -> Result<f64>;

    /// Decode an image file; an unreadable file yields an empty Mat
    fn imread(&self, filename: &str, flags: i32) -> Result<Mat>;

    fn imwrite(&self, filename: &str, image: &Mat) -> Result<bool>;

    fn resize(&self, src: &Mat, dsize: Size, interpolation: i32) -> Result<Mat>;

    fn gaussian_blur(&self, src: &Mat, ksize: Size, sigma_x: f64, sigma_y: f64) -> Result<Mat>;

    fn cvt_color(&self, src: &Mat, code: i32) -> Result<Mat>;
}

/// Backend for builds without a native library
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableBackend;

impl UnavailableBackend {
    fn unavailable<T>(&self, operation: &str) -> Result<T> {
        Err(Error::NativeLibrary(format!(
            "{} is unavailable: built without the opencv feature",
            operation
        )))
    }
}

impl VisionBackend for UnavailableBackend {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn version(&self) -> Result<Version> {
        self.unavailable("version")
    }

    fn build_information(&self) -> Result<String> {
        self.unavailable("getBuildInformation")
    }

    fn num_threads(&self) -> Result<i32> {
        self.unavailable("getNumThreads")
    }

    fn set_num_threads(&self, _threads: i32) -> Result<()> {
        self.unavailable("setNumThreads")
    }

    fn tick_count(&self) -> Result<i64> {
        self.unavailable("getTickCount")
    }

    fn tick_frequency(&self) -> Result<f64> {
        self.unavailable("getTickFrequency")
    }

    fn imread(&self, _filename: &str, _flags: i32) -> Result<Mat> {
        self.unavailable("imread")
    }

    fn imwrite(&self, _filename: &str, _image: &Mat) -> Result<bool> {
        self.unavailable("imwrite")
    }

    fn resize(&self, _src: &Mat, _dsize: Size, _interpolation: i32) -> Result<Mat> {
        self.unavailable("resize")
    }

    fn gaussian_blur(&self, _src: &Mat, _ksize: Size, _sigma_x: f64, _sigma_y: f64) -> Result<Mat> {
        self.unavailable("gaussianBlur")
    }

    fn cvt_color(&self, _src: &Mat, _code: i32) -> Result<Mat> {
        self.unavailable("cvtColor")
    }
}
