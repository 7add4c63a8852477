//! Navigation capabilities derived for the presentation layer.

use serde::{Deserialize, Serialize};

use chorus_core::types::{ContentDescriptor, CourseId, UserProfile, UserStatus};

use super::resolver::resolve;

/// Which sections the current user may reach.
///
/// Presentation code branches on these flags instead of comparing role
/// tiers itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Own profile page.
    pub profile: bool,
    /// Choir-wide statistics.
    pub choir_statistics: bool,
    /// Personal statistics charts (privileged tier only).
    pub personal_statistics: bool,
    /// Warnings and penalties page.
    pub penalties: bool,
    /// Restricted youth section.
    pub youth_section: bool,
}

impl Capabilities {
    /// Derives the capabilities from the current inputs. Without a profile
    /// every flag is false.
    pub fn derive(
        profile: Option<&UserProfile>,
        catalog: &[ContentDescriptor],
        youth_group: CourseId,
    ) -> Self {
        let Some(p) = profile else {
            return Self::default();
        };

        Self {
            profile: true,
            choir_statistics: true,
            personal_statistics: p.user_status == UserStatus::Privileged,
            penalties: true,
            youth_section: resolve(profile, catalog, youth_group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YOUTH: CourseId = CourseId(6);

    #[test]
    fn test_anonymous_has_nothing() {
        let caps = Capabilities::derive(None, &[ContentDescriptor::new(6, true)], YOUTH);
        assert_eq!(caps, Capabilities::default());
    }

    #[test]
    fn test_privileged_with_youth_materials() {
        let profile = UserProfile::new(UserStatus::Privileged, "Pavel");
        let caps = Capabilities::derive(
            Some(&profile),
            &[ContentDescriptor::new(6, true)],
            YOUTH,
        );
        assert!(caps.personal_statistics);
        assert!(caps.youth_section);
        assert!(caps.profile && caps.choir_statistics && caps.penalties);
    }

    #[test]
    fn test_restricted_sees_common_sections_only() {
        let profile = UserProfile::new(UserStatus::Restricted, "Lena");
        let caps = Capabilities::derive(
            Some(&profile),
            &[ContentDescriptor::new(6, true)],
            YOUTH,
        );
        assert!(caps.profile);
        assert!(!caps.personal_statistics);
        assert!(!caps.youth_section);
    }
}
