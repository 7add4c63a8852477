//! Restricted content group access.

use chorus_core::types::{CatalogEndpoint, CatalogQuery, ContentDescriptor, CourseId, UserProfile};

/// Whether the user may open the restricted content group `target_group`.
///
/// Both conditions must hold:
/// - the catalog lists at least one descriptor of `target_group`;
/// - the profile exists and is not of the most-restricted tier.
///
/// A missing profile or an empty catalog denies access.
pub fn resolve(
    profile: Option<&UserProfile>,
    catalog: &[ContentDescriptor],
    target_group: CourseId,
) -> bool {
    let Some(profile) = profile else {
        return false;
    };

    !profile.user_status.is_restricted() && catalog.iter().any(|d| d.course == target_group)
}

/// Catalog request used to probe `group` for the given profile.
///
/// Restricted users go through the staff listing, everyone else through
/// the client listing; both ask for downloadable materials only.
pub fn catalog_query(profile: &UserProfile, group: CourseId) -> CatalogQuery {
    let endpoint = if profile.user_status.is_restricted() {
        CatalogEndpoint::Staff
    } else {
        CatalogEndpoint::Client
    };

    CatalogQuery {
        endpoint,
        course: group,
        downloadable_only: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::types::UserStatus;

    const YOUTH: CourseId = CourseId(6);

    fn profile(status: UserStatus) -> UserProfile {
        UserProfile::new(status, "Irina")
    }

    #[test]
    fn test_restricted_tier_is_denied() {
        let catalog = [ContentDescriptor::new(6, true)];
        assert!(!resolve(
            Some(&profile(UserStatus::Restricted)),
            &catalog,
            YOUTH
        ));
    }

    #[test]
    fn test_standard_tier_with_matching_course() {
        let catalog = [ContentDescriptor::new(6, true)];
        assert!(resolve(Some(&profile(UserStatus::Standard)), &catalog, YOUTH));
        assert!(resolve(
            Some(&profile(UserStatus::Privileged)),
            &catalog,
            YOUTH
        ));
    }

    #[test]
    fn test_curator_and_unknown_tiers_are_not_restricted() {
        let catalog = [ContentDescriptor::new(6, true)];
        assert!(resolve(Some(&profile(UserStatus::Curator)), &catalog, YOUTH));
        assert!(resolve(Some(&profile(UserStatus::Other(9))), &catalog, YOUTH));
        assert_eq!(
            catalog_query(&profile(UserStatus::Curator), YOUTH).endpoint,
            CatalogEndpoint::Client
        );
    }

    #[test]
    fn test_empty_catalog_is_denied() {
        assert!(!resolve(Some(&profile(UserStatus::Standard)), &[], YOUTH));
    }

    #[test]
    fn test_other_courses_do_not_count() {
        let catalog = [
            ContentDescriptor::new(2, true),
            ContentDescriptor::new(5, false),
        ];
        assert!(!resolve(
            Some(&profile(UserStatus::Standard)),
            &catalog,
            YOUTH
        ));
    }

    #[test]
    fn test_missing_profile_is_denied() {
        let catalog = [ContentDescriptor::new(6, true)];
        assert!(!resolve(None, &catalog, YOUTH));
    }

    #[test]
    fn test_catalog_query_by_role() {
        let staff = catalog_query(&profile(UserStatus::Restricted), YOUTH);
        assert_eq!(staff.endpoint, CatalogEndpoint::Staff);
        assert!(staff.downloadable_only);

        let client = catalog_query(&profile(UserStatus::Standard), YOUTH);
        assert_eq!(client.endpoint, CatalogEndpoint::Client);
        assert_eq!(client.course, YOUTH);
    }
}
