//! # chorus-cache
//!
//! Remote data cache for Chorus: server responses keyed by [`QueryKey`],
//! held in-process with [moka](https://crates.io/crates/moka) and purged
//! wholesale whenever the session identity changes.
//!
//! [`QueryKey`]: chorus_core::types::QueryKey

pub mod keys;
pub mod memory;
pub mod provider;

pub use memory::MemoryQueryCache;
pub use provider::CacheManager;
