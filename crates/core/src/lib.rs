//! cvbridge core: the type conversion layer between a native vision
//! library's value types and the boundary-safe values a host runtime can
//! carry.
//!
//! # Architecture
//!
//! - **value.rs**: `ExternalValue`, the generic host-side representation
//! - **mat.rs** / **geometry.rs**: native value types (`Mat`, `Point2f`,
//!   `Rect`, `Size`, `Scalar`)
//! - **convert/**: one `TypeConverter` implementation per native type
//! - **args.rs**: positional argument access for exported operations
//! - **safe_call.rs**: error-translating call wrapper
//! - **config.rs** / **logging.rs**: ambient configuration and tracing setup
//!
//! Conversions are stateless and call-scoped: every converted value owns a
//! fresh copy of its payload.
//!
//! ```
//! use cvbridge_core::{from_external, to_external, Rect};
//!
//! let rects = vec![Rect::new(0, 0, 4, 4), Rect::new(2, 2, 8, 1)];
//! let external = to_external(&rects);
//! let back: Vec<Rect> = from_external(&external).unwrap();
//! assert_eq!(back, rects);
//! ```

#![warn(clippy::all)]

pub mod args;
pub mod config;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod mat;
pub mod safe_call;
pub mod value;

pub use args::CallArgs;
pub use config::{BridgeConfig, LogFormat};
pub use convert::{from_external, to_external, TypeConverter};
pub use error::{Error, Result};
pub use geometry::{Point2f, Rect, Scalar, Size};
pub use mat::{Depth, Mat, MatType};
pub use safe_call::{safe_call, HostError, HostErrorKind};
pub use value::{ExternalObject, ExternalValue};
