//! # chorus-auth
//!
//! Session and authorization state for the Chorus client.
//!
//! ## Modules
//!
//! - `token` - durable storage of the single credential token with a TTL
//! - `session` - the auth controller state machine (login, logout, flags)
//! - `entitlement` - pure access decisions derived from profile and catalog

pub mod entitlement;
pub mod session;
pub mod token;

pub use entitlement::{Capabilities, catalog_query, resolve};
pub use session::AuthController;
pub use token::{FileTokenStore, MemoryTokenStore};
