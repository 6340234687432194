//! FFI bindings exposing native vision operations to Node.js
//!
//! Every exported function takes host values, converts them through
//! `cvbridge-core`, calls the vision backend, and converts the result back.
//! Failures are translated by `cvbridge_core::safe_call` into the error the
//! host runtime raises.
//!
//! # Features
//!
//! - `napi`: Node.js bindings via napi-rs
//! - `opencv`: OpenCV-backed [`VisionBackend`]
//! - `addon`: both of the above
//!
//! # Architecture
//!
//! ## Shared modules
//! - **backend.rs**: `VisionBackend` trait and the fallback backend
//! - **registry.rs**: exported-function table and dispatch
//! - **core_info.rs** / **imgcodecs.rs** / **imgproc.rs**: argument
//!   handling per operation, one file per exported module
//!
//! ## OpenCV-specific (`opencv` feature)
//! - **opencv_backend.rs**: copies between `cvbridge_core::Mat` and `cv::Mat`
//!
//! ## Node.js-specific (`napi` feature)
//! - **napi/mod.rs**: addon entry point
//! - **napi/marshal.rs**: JS value ↔ `ExternalValue`
//! - **napi/error.rs**: `HostError` → thrown JS exception
//!
//! # Usage (Node.js)
//!
//! ```javascript
//! const cv = require('@cvbridge/native');
//!
//! const image = cv.imread('input.png');
//! const small = cv.resize(image, { width: 320, height: 240 });
//! const gray = cv.cvtColor(small, 6);
//! cv.imwrite('gray.png', gray);
//! console.log(cv.version, image.rows, image.cols, image.type);
//! console.log(cv.getNumThreads(), cv.getTickCount() / cv.getTickFrequency());
//! ```

#![warn(clippy::all)]

pub mod backend;
mod core_info;
mod imgcodecs;
mod imgproc;
pub mod registry;

#[cfg(feature = "opencv")]
pub mod opencv_backend;

#[cfg(feature = "napi")]
pub mod napi;

use std::sync::Arc;

use cvbridge_core::BridgeConfig;

pub use backend::{UnavailableBackend, VisionBackend, INTER_LINEAR, IMREAD_COLOR};
pub use registry::{FunctionRegistry, Handler};

/// Backend the addon uses: OpenCV when compiled in, otherwise a backend
/// that fails every call
pub fn default_backend() -> Arc<dyn VisionBackend> {
    #[cfg(feature = "opencv")]
    {
        Arc::new(opencv_backend::OpenCvBackend)
    }
    #[cfg(not(feature = "opencv"))]
    {
        Arc::new(UnavailableBackend)
    }
}

/// Registry with every built-in module registered against `backend`
pub fn build_registry(backend: Arc<dyn VisionBackend>, config: BridgeConfig) -> FunctionRegistry {
    let mut registry = FunctionRegistry::new(backend, config);
    registry.register_module(core_info::MODULE, core_info::FUNCTIONS);
    registry.register_module(imgcodecs::MODULE, imgcodecs::FUNCTIONS);
    registry.register_module(imgproc::MODULE, imgproc::FUNCTIONS);
    registry
}
