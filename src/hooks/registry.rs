//! Handler hook registry
//!
//! Modules register their handler hooks once at startup. After that the
//! registry is read-only and shared across every connection task.

use super::request::{Outcome, RequestRec};
use crate::logger;

/// Signature of a handler hook
pub type HandlerHook = fn(&mut RequestRec) -> Outcome;

/// Relative position of a hook in the handler chain
///
/// Hooks run from `ReallyFirst` to `ReallyLast`. Hooks with the same order
/// run in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HookOrder {
    ReallyFirst,
    First,
    Middle,
    Last,
    ReallyLast,
}

/// A loadable module: a name plus the function that registers its hooks
#[derive(Debug, Clone, Copy)]
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub register_hooks: fn(&mut HookRegistry),
}

#[derive(Debug, Clone, Copy)]
struct RegisteredHook {
    name: &'static str,
    hook: HandlerHook,
    order: HookOrder,
}

/// Ordered set of handler hooks
#[derive(Debug, Default)]
pub struct HookRegistry {
    handlers: Vec<RegisteredHook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry by letting every module register its hooks
    pub fn from_modules(modules: &[ModuleDescriptor]) -> Self {
        let mut registry = Self::new();
        for module in modules {
            let before = registry.len();
            (module.register_hooks)(&mut registry);
            if logger::debug_enabled() {
                logger::log_debug(&format!(
                    "[Module] {} registered {} handler hook(s)",
                    module.name,
                    registry.len() - before
                ));
            }
        }
        registry
    }

    /// Add a hook to the handler phase
    pub fn hook_handler(&mut self, name: &'static str, hook: HandlerHook, order: HookOrder) {
        self.handlers.push(RegisteredHook { name, hook, order });
        // stable: equal orders keep registration order
        self.handlers.sort_by_key(|h| h.order);
    }

    /// Run handler hooks until one of them handles the request
    pub fn run_handlers(&self, r: &mut RequestRec) -> Outcome {
        for registered in &self.handlers {
            if (registered.hook)(r) == Outcome::Handled {
                if logger::debug_enabled() {
                    logger::log_debug(&format!("[Hook] {} handled {}", registered.name, r.path));
                }
                return Outcome::Handled;
            }
        }
        Outcome::Declined
    }

    pub fn handler_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
