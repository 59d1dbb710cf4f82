//! HTTP protocol layer module
//!
//! Response builders shared by request dispatch, decoupled from the hooks
//! that produce response content.

pub mod response;

pub use response::{build_404_response, build_413_response, build_handled_response};
