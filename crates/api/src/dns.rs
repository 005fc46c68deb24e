//! Forward DNS lookups for submitted hosts

use async_trait::async_trait;
use std::net::IpAddr;
use trust_dns_resolver::{
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    TokioAsyncResolver,
};

/// Errors that can occur while resolving a host
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    /// The name resolved, but to no address (or does not exist)
    #[error("no address for host: {0}")]
    NoAddress(String),

    /// Any other resolver failure
    #[error("lookup failed: {0}")]
    Failed(String),
}

/// Resolves a domain name to its addresses
#[async_trait]
pub trait HostLookup: Send + Sync + 'static {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, LookupError>;
}

/// Lookup backed by trust-dns
pub struct DnsHostLookup {
    resolver: TokioAsyncResolver,
}

impl DnsHostLookup {
    /// Create a lookup from the system resolver configuration
    /// (`/etc/resolv.conf`, hosts file), falling back to Cloudflare.
    pub fn from_system_conf() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            tracing::warn!("System DNS configuration unavailable ({}), using Cloudflare", e);
            TokioAsyncResolver::tokio(ResolverConfig::cloudflare(), ResolverOpts::default())
        });

        Self { resolver }
    }
}

#[async_trait]
impl HostLookup for DnsHostLookup {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        let addresses: Vec<IpAddr> = self
            .resolver
            .lookup_ip(host)
            .await
            .map_err(|e| classify(host, e))?
            .iter()
            .collect();

        if addresses.is_empty() {
            return Err(LookupError::NoAddress(host.to_string()));
        }

        Ok(addresses)
    }
}

fn classify(host: &str, err: ResolveError) -> LookupError {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupError::NoAddress(host.to_string()),
        _ => LookupError::Failed(err.to_string()),
    }
}
