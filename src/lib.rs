//! Hook-based HTTP server hosting the `foo_module` greeting handler.
//!
//! Modules register handler hooks into a [`hooks::HookRegistry`] at
//! startup. For every request the host assigns a handler name from its
//! routing configuration and runs the hooks until one handles it.

pub mod config;
pub mod handler;
pub mod hooks;
pub mod http;
pub mod logger;
pub mod modules;
pub mod routing;
pub mod server;
