//! URL validation and normalization
//!
//! A submitted string is turned into a canonical absolute URL:
//! - `http://` is prepended unless it already starts with `http://` or `https://`
//! - the result must parse as an absolute URL with a host
//! - domain hosts must resolve to at least one address

use std::sync::Arc;
use url::{Host, Url};

use crate::dns::{HostLookup, LookupError};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("address doesn't exist: {0}")]
    AddressNotFound(String),
}

/// Prepend `http://` when the input has no HTTP(S) scheme.
///
/// The prefix check is case-sensitive.
pub fn ensure_scheme(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    }
}

/// Parse an absolute URL that carries a host.
pub fn parse_absolute(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

    if url.host().is_none() {
        return Err(ValidationError::InvalidUrl(format!("no host in {}", raw)));
    }

    Ok(url)
}

/// Validates submitted URLs against DNS
#[derive(Clone)]
pub struct UrlValidator {
    lookup: Arc<dyn HostLookup>,
}

impl UrlValidator {
    pub fn new(lookup: Arc<dyn HostLookup>) -> Self {
        Self { lookup }
    }

    /// Normalize `raw` and check that its host resolves.
    ///
    /// Returns the canonical URL string, e.g. `freeCodeCamp.org` becomes
    /// `http://freecodecamp.org/`.
    pub async fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let url = parse_absolute(&ensure_scheme(raw))?;

        match url.host() {
            Some(Host::Domain(domain)) => match self.lookup.lookup(domain).await {
                Ok(_) => {}
                Err(LookupError::NoAddress(host)) => {
                    return Err(ValidationError::AddressNotFound(host));
                }
                Err(LookupError::Failed(reason)) => {
                    tracing::warn!(host = %domain, "DNS lookup failed: {}", reason);
                    return Err(ValidationError::InvalidUrl(reason));
                }
            },
            // IP literals need no lookup
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
            None => return Err(ValidationError::InvalidUrl(raw.to_string())),
        }

        Ok(url.into())
    }
}
