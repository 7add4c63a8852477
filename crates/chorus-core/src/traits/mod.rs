//! Core traits defined in `chorus-core` and implemented by other crates.

pub mod cache;
pub mod remote;
pub mod token_store;

pub use cache::QueryCache;
pub use remote::{CatalogSource, CredentialExchange, ProfileSource};
pub use token_store::TokenStore;
