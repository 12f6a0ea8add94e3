//! Credential key extraction from the request transport

use actix_web::HttpRequest;
use tracing::trace;
use url::form_urlencoded;

use crate::config::CredentialLocation;
use crate::error::{AuthError, Result};

/// Extracts the configured credential key from inbound requests
///
/// A request without the credential yields an empty key: the guest path,
/// which downstream sources may still resolve through guest-access rules.
#[derive(Debug, Clone)]
pub struct CredentialLocator {
    /// Name of the query parameter, header, or cookie holding the key
    key_name: String,
    /// Transport location searched for the key
    location: CredentialLocation,
}

impl CredentialLocator {
    /// Create a locator for the configured key name and location
    pub fn new(key_name: impl Into<String>, location: CredentialLocation) -> Self {
        Self {
            key_name: key_name.into(),
            location,
        }
    }

    /// Extract the credential key from `req`
    ///
    /// Path extraction is categorically unsupported and aborts the decision.
    pub fn extract(&self, req: &HttpRequest) -> Result<String> {
        let key = match self.location {
            CredentialLocation::Query => self.from_query(req),
            CredentialLocation::Header => self.from_header(req),
            CredentialLocation::Cookie => self.from_cookie(req),
            CredentialLocation::Path => {
                return Err(AuthError::unsupported_location(
                    CredentialLocation::Path.as_str(),
                ))
            }
        };

        trace!(
            location = %self.location,
            present = !key.is_empty(),
            "credential key extracted"
        );
        Ok(key)
    }

    fn from_query(&self, req: &HttpRequest) -> String {
        form_urlencoded::parse(req.query_string().as_bytes())
            .find(|(name, _)| name.as_ref() == self.key_name.as_str())
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    }

    fn from_header(&self, req: &HttpRequest) -> String {
        req.headers()
            .get(self.key_name.as_str())
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    fn from_cookie(&self, req: &HttpRequest) -> String {
        req.cookie(&self.key_name)
            .map(|cookie| cookie.value().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_from_query() {
        let locator = CredentialLocator::new("access_token", CredentialLocation::Query);
        let req = TestRequest::default()
            .uri("/orders/list?access_token=abc123&page=2")
            .to_http_request();

        assert_eq!(locator.extract(&req).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_from_header() {
        let locator = CredentialLocator::new("x-access-token", CredentialLocation::Header);
        let req = TestRequest::default()
            .insert_header(("x-access-token", "abc123"))
            .to_http_request();

        assert_eq!(locator.extract(&req).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_from_cookie() {
        let locator = CredentialLocator::new("access_token", CredentialLocation::Cookie);
        let req = TestRequest::default()
            .cookie(Cookie::new("access_token", "abc123"))
            .to_http_request();

        assert_eq!(locator.extract(&req).unwrap(), "abc123");
    }

    #[test]
    fn test_missing_credential_is_empty_guest_key() {
        let locator = CredentialLocator::new("access_token", CredentialLocation::Query);
        let req = TestRequest::default().uri("/orders/list").to_http_request();

        assert_eq!(locator.extract(&req).unwrap(), "");
    }

    #[test]
    fn test_path_location_is_unsupported() {
        let locator = CredentialLocator::new("access_token", CredentialLocation::Path);
        let req = TestRequest::default().to_http_request();

        let err = locator.extract(&req).unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedLocation { .. }));
    }
}
