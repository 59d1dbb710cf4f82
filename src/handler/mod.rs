//! Request handler module
//!
//! Responsible for dispatching each request through the handler hooks.

pub mod router;

// Re-export main entry point
pub use router::{dispatch, handle_request};
