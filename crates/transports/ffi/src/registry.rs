//! Exported-function table
//!
//! The registry maps host-visible function names to handlers and runs
//! every call through `safe_call`, so a handler can return any bridge
//! `Error` (or panic) and the caller still gets a translated `HostError`.
//! It is built once at module load and read-only afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use cvbridge_core::{
    safe_call, BridgeConfig, CallArgs, Error, ExternalObject, ExternalValue, HostError, Result,
};

use crate::backend::VisionBackend;

/// Handler for one exported function
pub type Handler = fn(&dyn VisionBackend, &CallArgs) -> Result<ExternalValue>;

struct Entry {
    module: &'static str,
    handler: Handler,
}

pub struct FunctionRegistry {
    backend: Arc<dyn VisionBackend>,
    config: BridgeConfig,
    functions: BTreeMap<&'static str, Entry>,
    modules: Vec<&'static str>,
}

impl FunctionRegistry {
    /// Empty registry; see `crate::build_registry` for the built-in modules
    pub fn new(backend: Arc<dyn VisionBackend>, config: BridgeConfig) -> Self {
        Self {
            backend,
            config,
            functions: BTreeMap::new(),
            modules: Vec::new(),
        }
    }

    /// Register `functions` under `module`
    ///
    /// A name registered twice keeps the later handler.
    pub fn register_module(&mut self, module: &'static str, functions: &[(&'static str, Handler)]) {
        for &(name, handler) in functions {
            if let Some(previous) = self.functions.insert(name, Entry { module, handler }) {
                tracing::warn!(
                    function = name,
                    previous = previous.module,
                    module,
                    "exported function registered twice, keeping the later one"
                );
            }
        }
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
        tracing::debug!(module, functions = functions.len(), "registered module");
    }

    /// Exported function names, sorted
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered module names in registration order
    pub fn modules(&self) -> &[&'static str] {
        &self.modules
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn VisionBackend {
        self.backend.as_ref()
    }

    /// Invoke the function `name` with host arguments
    pub fn call(&self, name: &str, args: &CallArgs) -> std::result::Result<ExternalValue, HostError> {
        safe_call(&self.config, || {
            let entry = self
                .functions
                .get(name)
                .ok_or_else(|| Error::InvalidArgument(format!("no exported function named '{}'", name)))?;
            tracing::trace!(
                function = name,
                module = entry.module,
                args = args.len(),
                backend = self.backend.name(),
                "dispatching call"
            );
            (entry.handler)(self.backend.as_ref(), args)
        })
    }

    /// Module-level export objects: `version` and `modules`
    ///
    /// `version` is left out when the backend cannot report one.
    pub fn module_info(&self) -> ExternalObject {
        let mut info = ExternalObject::new();

        match self.backend.version() {
            Ok((major, minor, revision)) => {
                let version = ExternalObject::new()
                    .with("major", major)
                    .with("minor", minor)
                    .with("revision", revision);
                info.insert("version", version);
            }
            Err(e) => tracing::warn!(backend = self.backend.name(), error = %e, "no native version"),
        }

        let modules: ExternalObject = self
            .modules
            .iter()
            .map(|&module| (module.to_string(), ExternalValue::Bool(true)))
            .collect();
        info.insert("modules", modules);

        info
    }
}
