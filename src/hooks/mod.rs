//! Hook layer
//!
//! Defines the request record seen by handler hooks and the registry the
//! host runs them from.

mod registry;
mod request;

pub use registry::{HandlerHook, HookOrder, HookRegistry, ModuleDescriptor};
pub use request::{Outcome, Output, RequestRec};
