//! Shared web plumbing for Skillstream services: tracing setup, request-id
//! middleware, and serde helpers. No domain logic lives here.

pub mod middleware;
pub mod serde;
pub mod tracing;
