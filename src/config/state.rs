// Application state module
// Read-only configuration plus the hook registry shared by all connections

use super::types::Config;
use crate::hooks::{HookRegistry, ModuleDescriptor};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Frozen after startup
    pub hooks: HookRegistry,
}

impl AppState {
    /// Build state and register every module's hooks
    pub fn new(config: &Config, modules: &[ModuleDescriptor]) -> Self {
        Self {
            config: config.clone(),
            hooks: HookRegistry::from_modules(modules),
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
