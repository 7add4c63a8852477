//! # chorus-service
//!
//! The session context: one explicitly constructed object owning the token
//! store, the query cache, the auth controller, and the API client, plus
//! the cached profile and catalog queries that feed the entitlement
//! resolver.

pub mod context;
pub mod query;

pub use context::SessionContext;
