//! # Middleware
//!
//! [`LoggingMiddleware`] logs every update and the final response; [`AuthMiddleware`] lets through
//! only the single authorized user.

mod middleware;

pub use middleware::{AuthMiddleware, LoggingMiddleware, DEFAULT_REFUSAL_MESSAGE};

#[cfg(test)]
mod test;
