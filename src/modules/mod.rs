//! Modules compiled into the server
//!
//! Each module exposes a `ModuleDescriptor`. The host builds its hook
//! registry from this list once at startup.

pub mod foo;

use crate::hooks::ModuleDescriptor;

/// Modules loaded at startup, in load order
pub const MODULES: &[ModuleDescriptor] = &[foo::FOO_MODULE];
