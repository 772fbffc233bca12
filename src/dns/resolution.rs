//! IPv4 resolution on top of `hickory-resolver`.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;

use super::backend::{DnsAnswer, DnsBackend};
use crate::error_handling::LookupError;

/// `DnsBackend` backed by a shared hickory resolver.
#[derive(Clone)]
pub struct HickoryBackend {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryBackend {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsBackend for HickoryBackend {
    async fn lookup_ipv4(&self, name: &str) -> DnsAnswer {
        // Fully qualified so search domains are never appended
        let fqdn = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{name}.")
        };
        match self.resolver.ipv4_lookup(fqdn.as_str()).await {
            Ok(lookup) => DnsAnswer::Addresses(lookup.iter().map(|a| a.0).collect()),
            Err(e) => {
                log::debug!("A lookup for {fqdn} failed: {e}");
                classify_resolve_error(&e)
            }
        }
    }
}

/// Maps a hickory error onto the three failure shapes we care about.
pub(crate) fn classify_resolve_error(error: &ResolveError) -> DnsAnswer {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NXDomain | ResponseCode::NoError => DnsAnswer::NoSuchName,
            other => DnsAnswer::Failed(format!("server answered {other:?}")),
        },
        ResolveErrorKind::Timeout => DnsAnswer::TimedOut,
        _ => DnsAnswer::Failed(error.to_string()),
    }
}

/// Resolves a hostname to its first IPv4 address.
///
/// # Errors
///
/// Returns `LookupError::DnsResolutionFailed` if the name does not exist, has
/// no A records, the resolver fails, or no answer arrives within `timeout`.
pub async fn resolve_host_to_ipv4(
    backend: &dyn DnsBackend,
    host: &str,
    timeout: Duration,
) -> Result<Ipv4Addr, LookupError> {
    let answer = tokio::time::timeout(timeout, backend.lookup_ipv4(host))
        .await
        .unwrap_or(DnsAnswer::TimedOut);

    let failed = |reason: String| LookupError::DnsResolutionFailed {
        host: host.to_string(),
        reason,
    };
    match answer {
        DnsAnswer::Addresses(addrs) => addrs
            .first()
            .copied()
            .ok_or_else(|| failed("no IPv4 addresses found".to_string())),
        DnsAnswer::NoSuchName => Err(failed("no such name or no A records".to_string())),
        DnsAnswer::TimedOut => Err(failed(format!("no answer within {timeout:?}"))),
        DnsAnswer::Failed(reason) => Err(failed(reason)),
    }
}
