//! Raising translated errors in JavaScript
//!
//! `HostErrorKind::TypeError` must surface as a JS `TypeError`, which
//! `napi::Error` cannot express on its own; it is thrown directly and the
//! returned error only carries the pending-exception status.

use cvbridge_core::{HostError, HostErrorKind};
use napi::{Env, Status};

/// Error for the JS `Error` class
pub fn to_napi_error(err: HostError) -> napi::Error {
    napi::Error::from_reason(err.message)
}

/// Turn a `HostError` into the exception the caller sees
pub fn throw_host_error(env: &Env, err: HostError) -> napi::Error {
    match err.kind {
        HostErrorKind::TypeError => match env.throw_type_error(&err.message, None) {
            Ok(()) => napi::Error::new(Status::PendingException, err.message),
            Err(e) => e,
        },
        HostErrorKind::Error => to_napi_error(err),
    }
}
