//! Public URL generation through the CDN that fronts the image bucket.

use thiserror::Error;

/// CDN URL errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CdnError {
    /// No CDN domain was configured.
    #[error("CLOUDFRONT_DOMAIN environment variable is not set")]
    DomainNotConfigured,
}

/// Maps object-store keys to public CDN URLs.
#[derive(Debug, Clone, Default)]
pub struct CdnUrlBuilder {
    domain: String,
}

impl CdnUrlBuilder {
    /// Create a builder for `domain`. An empty domain leaves it unconfigured.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Whether a domain is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty()
    }

    /// Build `https://{domain}/{key}`, ignoring trailing slashes on the domain.
    ///
    /// # Errors
    ///
    /// Returns [`CdnError::DomainNotConfigured`] if the domain is empty.
    pub fn url_for(&self, key: &str) -> Result<String, CdnError> {
        if !self.is_configured() {
            return Err(CdnError::DomainNotConfigured);
        }

        let domain = self.domain.trim_end_matches('/');
        Ok(format!("https://{domain}/{key}"))
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_url_ends_with_key(
            domain in "[a-z0-9]{1,20}\\.[a-z]{2,6}/{0,3}",
            key in "[a-zA-Z0-9-]{1,40}(\\.[a-z]{1,4})?",
        ) {
            let url = CdnUrlBuilder::new(domain.clone()).url_for(&key).expect("configured");
            let trimmed = domain.trim_end_matches('/');

            prop_assert!(url.starts_with("https://"));
            prop_assert_eq!(url, format!("https://{trimmed}/{key}"));
        }
    }
}
