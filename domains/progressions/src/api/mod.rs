//! API layer for the Progressions domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ProgressionsState;
pub use routes::routes;
