//! # chorus-client
//!
//! `reqwest` implementation of the portal endpoints the session layer
//! depends on: credential exchange, current-user profile, and material
//! listings.

pub mod dto;
pub mod http;

pub use http::ApiClient;
