//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used for A-record and blocklist lookups.
///
/// Uses the system resolver configuration when it can be read and falls back
/// to hickory's default public resolvers otherwise. Each query gets a single
/// attempt bounded by `timeout`; callers apply their own deadlines on top.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if `timeout` is zero.
pub fn init_resolver(timeout: Duration) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    if timeout.is_zero() {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be greater than zero".to_string(),
        ));
    }

    let (config, mut opts) = match read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            log::warn!("Could not read system DNS configuration ({e}), using public resolvers");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };
    opts.timeout = timeout;
    opts.attempts = 1;
    // Queries are always fully qualified; never append search domains
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(config, opts)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_resolver() {
        assert!(init_resolver(Duration::from_millis(500)).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = init_resolver(Duration::ZERO).unwrap_err();
        assert!(matches!(err, InitializationError::DnsResolverError(_)));
    }
}
