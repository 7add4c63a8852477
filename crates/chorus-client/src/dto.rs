//! Wire shapes of the portal endpoints.

use serde::{Deserialize, Serialize};

use chorus_core::types::{ContentDescriptor, Credentials};

/// Body of the token request.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for TokenRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: &credentials.identifier,
            password: &credentials.secret,
        }
    }
}

/// Error body returned by the portal (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Material listings come back either bare or paginated.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialListing {
    Page { results: Vec<ContentDescriptor> },
    Plain(Vec<ContentDescriptor>),
}

impl MaterialListing {
    /// Normalizes both shapes to a list of descriptors.
    pub fn into_descriptors(self) -> Vec<ContentDescriptor> {
        match self {
            Self::Page { results } => results,
            Self::Plain(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorus_core::types::CourseId;

    #[test]
    fn test_listing_shapes() {
        let plain: MaterialListing =
            serde_json::from_str(r#"[{"course": 6, "is_download": true, "name": "Hymn"}]"#)
                .unwrap();
        let page: MaterialListing = serde_json::from_str(
            r#"{"count": 1, "next": null, "results": [{"course": "6", "is_download": true}]}"#,
        )
        .unwrap();

        let plain = plain.into_descriptors();
        let page = page.into_descriptors();
        assert_eq!(plain, page);
        assert_eq!(plain[0].course, CourseId(6));
    }

    #[test]
    fn test_token_request_field_names() {
        let credentials = Credentials::new("alto", "s3cret");
        let body = serde_json::to_value(TokenRequest::from(&credentials)).unwrap();
        assert_eq!(body, serde_json::json!({"username": "alto", "password": "s3cret"}));
    }
}
