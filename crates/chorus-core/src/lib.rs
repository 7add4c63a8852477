//! # chorus-core
//!
//! Core crate for the Chorus client session layer. Contains the traits the
//! other crates implement, configuration schemas, domain types (session
//! flags, profiles, catalog descriptors, query keys), and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Chorus crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, AuthError};
pub use result::AppResult;
