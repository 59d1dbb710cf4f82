//! Greeting handler
//!
//! Answers requests routed to `foo_handler` with a fixed HTML greeting.

use crate::hooks::{HookOrder, HookRegistry, ModuleDescriptor, Outcome, RequestRec};

/// Handler name this module answers to
pub const HANDLER_NAME: &str = "foo_handler";

const CONTENT_TYPE: &str = "text/html";
const GREETING: &[u8] = b"Hello, martian!";

/// Module descriptor passed to the host at startup
pub const FOO_MODULE: ModuleDescriptor = ModuleDescriptor {
    name: "foo_module",
    register_hooks,
};

/// Handle requests whose handler name is exactly `foo_handler`
pub fn foo_handler(r: &mut RequestRec) -> Outcome {
    if r.handler() != Some(HANDLER_NAME) {
        return Outcome::Declined;
    }

    r.set_content_type(CONTENT_TYPE);
    r.write_body(GREETING);

    Outcome::Handled
}

fn register_hooks(hooks: &mut HookRegistry) {
    hooks.hook_handler(HANDLER_NAME, foo_handler, HookOrder::Middle);
}
