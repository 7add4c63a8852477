//! Query key builders for every cached Chorus response.
//!
//! Centralising key construction keeps the fetch side and the invalidation
//! side agreeing on names.

use chorus_core::types::{CatalogEndpoint, CatalogQuery, QueryKey};

/// Key of the current-user profile.
pub fn current_user() -> QueryKey {
    QueryKey::new("current-user")
}

/// Key of a catalog listing.
///
/// The listing is part of the key so a role change never serves the other
/// listing's response.
pub fn materials(query: &CatalogQuery) -> QueryKey {
    let listing = match query.endpoint {
        CatalogEndpoint::Staff => "staff",
        CatalogEndpoint::Client => "client",
    };
    query.params().into_iter().fold(
        QueryKey::new("materials").with_param("listing", listing),
        |key, (k, v)| key.with_param(k, v),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::types::CourseId;

    #[test]
    fn test_materials_key() {
        let query = CatalogQuery {
            endpoint: CatalogEndpoint::Client,
            course: CourseId(6),
            downloadable_only: true,
        };
        assert_eq!(
            materials(&query).to_string(),
            "materials?listing=client&is_download=true&course=6"
        );
    }

    #[test]
    fn test_listing_separates_keys() {
        let staff = CatalogQuery {
            endpoint: CatalogEndpoint::Staff,
            course: CourseId(6),
            downloadable_only: true,
        };
        let client = CatalogQuery {
            endpoint: CatalogEndpoint::Client,
            ..staff
        };
        assert_ne!(materials(&staff), materials(&client));
    }
}
