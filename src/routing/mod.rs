//! Routing module
//!
//! Assigns handler names to requests:
//! - Route matching based on exact path or path prefix
//! - Header-based routing

mod matcher;

pub use matcher::{match_route, resolve_handler};
