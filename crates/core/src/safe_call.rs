//! Error-translating call wrapper
//!
//! Every exported operation runs through [`safe_call`]. Whatever goes wrong
//! inside (a conversion mismatch, a native library failure, a panic) comes
//! out as a [`HostError`] the binding can raise in the host runtime:
//!
//! - `Error::TypeError` stays a type error, message unchanged
//! - `Error::NativeLibrary` gets the configured native prefix
//! - `Error::Unknown` (a captured panic, or anything the native side
//!   could not classify) becomes the configured unknown-error message
//! - any other `Error` gets the generic prefix

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::config::BridgeConfig;
use crate::error::{Error, Result};

/// Class of exception to raise on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    TypeError,
    Error,
}

/// A failure ready to be thrown into the host runtime
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub kind: HostErrorKind,
    pub message: String,
}

impl HostError {
    pub fn type_error(message: impl Into<String>) -> Self {
        Self {
            kind: HostErrorKind::TypeError,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: HostErrorKind::Error,
            message: message.into(),
        }
    }
}

/// Map a bridge error onto the host taxonomy
pub fn translate(config: &BridgeConfig, err: Error) -> HostError {
    match err {
        Error::TypeError(msg) => HostError::type_error(msg),
        Error::NativeLibrary(msg) => {
            HostError::error(format!("{}{}", config.native_error_prefix, msg))
        }
        Error::Unknown(_) => HostError::error(config.unknown_error_message.clone()),
        other => HostError::error(format!("{}{}", config.generic_error_prefix, other)),
    }
}

/// Run `f`, translating errors and panics into [`HostError`]
pub fn safe_call<T, F>(config: &BridgeConfig, f: F) -> std::result::Result<T, HostError>
where
    F: FnOnce() -> Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            tracing::debug!(error = %err, "call failed");
            Err(translate(config, err))
        }
        Err(payload) => {
            let err = Error::Unknown(panic_message(payload.as_ref()));
            tracing::error!(panic = %err, "call panicked");
            Err(translate(config, err))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
