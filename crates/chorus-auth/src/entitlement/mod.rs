//! Access decisions derived from the user's profile and the content catalog.
//!
//! Everything here is pure: no I/O, no caching, no errors. Callers are
//! expected to re-run the resolver whenever the profile or the catalog
//! changes.

pub mod capabilities;
pub mod resolver;

pub use capabilities::Capabilities;
pub use resolver::{catalog_query, resolve};
