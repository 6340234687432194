//! Node.js addon entry point
//!
//! On load the addon reads `BridgeConfig` from the environment, initialises
//! tracing, builds the function registry over the default backend and
//! exposes every registered function on `exports`, together with the
//! `version` and `modules` objects.
//!
//! # Call path
//!
//! ```text
//! JS args ──marshal──▶ CallArgs ──registry.call──▶ handler ──▶ VisionBackend
//!                                      │
//! JS value ◀──marshal── ExternalValue ◀┘  (or HostError ──error──▶ throw)
//! ```
//!
//! # Binding API
//!
//! The exported names come from `FunctionRegistry` at load time, not from
//! Rust items, so `#[napi]` functions cannot describe them. The addon uses
//! the `compat-mode` API instead: `#[module_exports]` for the entry point and
//! `Env::create_function_from_closure` with a raw `CallContext` per export.

pub mod error;
pub mod marshal;

use std::sync::Arc;

use cvbridge_core::{logging, BridgeConfig, CallArgs};
use napi::{CallContext, Env, JsObject, JsUnknown};
use napi_derive::module_exports;

use crate::registry::FunctionRegistry;

#[module_exports]
fn init(mut exports: JsObject, env: Env) -> napi::Result<()> {
    let (config, config_error) = match BridgeConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (BridgeConfig::default(), Some(e)),
    };
    logging::init_tracing(&config.log_filter, config.log_format);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring invalid bridge configuration");
    }

    let registry = Arc::new(crate::build_registry(crate::default_backend(), config));

    for name in registry.names() {
        let registry = Arc::clone(&registry);
        let function =
            env.create_function_from_closure(name, move |ctx| call_export(&registry, name, ctx))?;
        exports.set_named_property(name, function)?;
    }

    for (key, value) in registry.module_info().iter() {
        exports.set_named_property(key, marshal::external_to_js(&env, value)?)?;
    }

    tracing::info!(
        backend = registry.backend().name(),
        functions = registry.names().count(),
        "cvbridge addon loaded"
    );
    Ok(())
}

fn call_export(registry: &FunctionRegistry, name: &str, ctx: CallContext<'_>) -> napi::Result<JsUnknown> {
    let mut values = Vec::with_capacity(ctx.length);
    for index in 0..ctx.length {
        values.push(marshal::js_to_external(ctx.get::<JsUnknown>(index)?)?);
    }

    match registry.call(name, &CallArgs::new(values)) {
        Ok(value) => marshal::external_to_js(ctx.env, &value),
        Err(err) => Err(error::throw_host_error(ctx.env, err)),
    }
}
