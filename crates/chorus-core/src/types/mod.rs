//! Domain types shared across Chorus crates.

pub mod catalog;
pub mod credentials;
pub mod profile;
pub mod query_key;
pub mod session;
pub mod token;

pub use catalog::{CatalogEndpoint, CatalogQuery, ContentDescriptor, CourseId};
pub use credentials::Credentials;
pub use profile::{UserProfile, UserStatus};
pub use query_key::QueryKey;
pub use session::{AuthState, Session};
pub use token::{Token, TokenGrant};
