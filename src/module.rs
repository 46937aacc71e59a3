//! Host framework contract for pluggable resource backends.

use tokio::task::JoinHandle;

use crate::error::{BackendError, Result};
use crate::mapper::ResourceMap;

/// Kind of plugin a module registers as with the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
    Backend,
}

impl ModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Backend => "backend",
        }
    }
}

/// Services the host framework shares with its plugins. Backends may ignore them.
#[derive(Debug, Clone, Default)]
pub struct Services;

/// Framework-level options passed alongside the backend's own options.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub debug: bool,
}

/// Error-first completion callback for `read`: exactly one of the two
/// arguments is `Some`.
pub type ReadCallback = Box<dyn FnOnce(Option<BackendError>, Option<ResourceMap>) + Send + 'static>;

/// A resource backend the host framework loads translations through.
pub trait BackendModule {
    type Options;

    const MODULE_TYPE: ModuleType = ModuleType::Backend;

    fn init(
        &mut self,
        services: &Services,
        backend_options: Self::Options,
        framework_options: &InitOptions,
    ) -> Result<()>;

    /// Resolve resources for one language/namespace pair and report them via
    /// `callback`. Must be called from within a tokio runtime.
    fn read(&self, language: &str, namespace: &str, callback: ReadCallback) -> JoinHandle<()>;
}
