//! Registry lookups over the WHOIS protocol (RFC 3912).
//!
//! One TCP connection per attempt: connect to `server:port`, send the query
//! terminated by CRLF, read until the server closes the connection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::RwLock;
use tokio_retry::RetryIf;

use super::servers::{known_registry, parse_iana_referral};
use super::types::RawRegistryRecord;
use crate::config::{Config, IANA_WHOIS_SERVER, MAX_REGISTRY_RESPONSE_BYTES};
use crate::domain::Domain;
use crate::engine::{Clock, SystemClock};
use crate::error_handling::{get_retry_strategy, is_retriable_error, LookupError};

/// Connection and server-selection settings for registry lookups.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub port: u16,
    /// Deadline for one attempt (connect + query + full read)
    pub attempt_timeout: Duration,
    /// Retries after the first attempt, unreachable registries only
    pub retries: usize,
    /// Queried for every domain when set, bypassing server selection
    pub registry_override: Option<String>,
    /// Used when no registry is known or discoverable for a TLD
    pub fallback_registry: Option<String>,
    /// IANA server for discovering unmapped TLDs; `None` disables discovery
    pub iana_server: Option<String>,
}

impl From<&Config> for RegistrySettings {
    fn from(config: &Config) -> Self {
        Self {
            port: config.whois_port,
            attempt_timeout: config.registry_timeout(),
            retries: config.registry_retries,
            registry_override: config.registry_host.clone(),
            fallback_registry: config.fallback_registry.clone(),
            iana_server: config
                .iana_discovery
                .then(|| IANA_WHOIS_SERVER.to_string()),
        }
    }
}

/// Fetches raw registration records from the authoritative registry.
pub struct RegistryLookupClient {
    settings: RegistrySettings,
    clock: Arc<dyn Clock>,
    /// TLD -> server learned from IANA; `None` records "IANA has no server"
    discovered: RwLock<HashMap<String, Option<String>>>,
}

impl RegistryLookupClient {
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            settings,
            clock: Arc::new(SystemClock),
            discovered: RwLock::new(HashMap::new()),
        }
    }

    /// Stamps records with `clock` instead of the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Queries the registry responsible for `domain`.
    ///
    /// The query is the registrable domain ("sub.example.co.uk" is looked up
    /// as "example.co.uk"). A "no match" answer is still a record.
    ///
    /// # Errors
    ///
    /// - `NoRegistryForSuffix` when no server can be selected
    /// - `RegistryUnreachable` once every attempt failed at the network level
    /// - `RegistryProtocolError` for empty or oversized answers
    pub async fn lookup(&self, domain: &Domain) -> Result<RawRegistryRecord, LookupError> {
        let registry = self.registry_for(domain).await?;
        let query = domain.registrable();
        let text = self.query_with_retry(&registry, query).await?;
        log::debug!(
            "Registry {registry} returned {} bytes for {query}",
            text.len()
        );
        Ok(RawRegistryRecord {
            query: query.to_string(),
            registry,
            queried_at: self.clock.now(),
            text,
        })
    }

    /// Picks the registry server for `domain`.
    ///
    /// Order: configured override, static TLD map, IANA discovery (memoized),
    /// configured fallback.
    pub async fn registry_for(&self, domain: &Domain) -> Result<String, LookupError> {
        if let Some(host) = &self.settings.registry_override {
            return Ok(host.clone());
        }
        let tld = domain.tld();
        if let Some(server) = known_registry(tld) {
            return Ok(server.to_string());
        }
        if let Some(server) = self.discover(tld).await {
            return Ok(server);
        }
        if let Some(fallback) = &self.settings.fallback_registry {
            log::debug!("No registry known for .{tld}, using fallback {fallback}");
            return Ok(fallback.clone());
        }
        Err(LookupError::NoRegistryForSuffix {
            suffix: tld.to_string(),
        })
    }

    async fn discover(&self, tld: &str) -> Option<String> {
        let iana = self.settings.iana_server.as_deref()?;
        if let Some(cached) = self.discovered.read().await.get(tld) {
            return cached.clone();
        }

        match self.query_with_retry(iana, tld).await {
            Ok(text) => {
                let server = parse_iana_referral(&text);
                match &server {
                    Some(server) => log::info!("Discovered registry {server} for .{tld}"),
                    None => log::info!("IANA lists no WHOIS server for .{tld}"),
                }
                self.discovered
                    .write()
                    .await
                    .insert(tld.to_string(), server.clone());
                server
            }
            Err(e) => {
                // Not memoized: the next lookup may reach IANA
                log::warn!("Registry discovery for .{tld} failed: {e}");
                None
            }
        }
    }

    async fn query_with_retry(&self, server: &str, query: &str) -> Result<String, LookupError> {
        let attempts = AtomicUsize::new(0);
        let result = RetryIf::spawn(
            get_retry_strategy(self.settings.retries),
            || {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                log::debug!("WHOIS {server} <- {query} (attempt {attempt})");
                self.query_once(server, query)
            },
            |e: &LookupError| {
                let retry = is_retriable_error(e);
                if retry {
                    log::warn!("{e}, retrying");
                }
                retry
            },
        )
        .await;

        if let Err(e) = &result {
            log::debug!(
                "WHOIS {server} gave up after {} attempt(s): {e}",
                attempts.load(Ordering::SeqCst)
            );
        }
        result
    }

    async fn query_once(&self, server: &str, query: &str) -> Result<String, LookupError> {
        let timeout = self.settings.attempt_timeout;
        let exchange = async {
            let mut stream = TcpStream::connect((server, self.settings.port))
                .await
                .map_err(|e| LookupError::unreachable(server, e))?;
            stream
                .write_all(format!("{query}\r\n").as_bytes())
                .await
                .map_err(|e| LookupError::unreachable(server, e))?;

            // One byte past the cap is enough to detect an oversized answer
            let mut body = Vec::new();
            stream
                .take(MAX_REGISTRY_RESPONSE_BYTES as u64 + 1)
                .read_to_end(&mut body)
                .await
                .map_err(|e| LookupError::unreachable(server, e))?;
            Ok::<_, LookupError>(body)
        };

        let body = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| {
                LookupError::unreachable(server, format!("no complete answer within {timeout:?}"))
            })??;

        if body.len() > MAX_REGISTRY_RESPONSE_BYTES {
            return Err(LookupError::protocol(
                server,
                format!("response exceeds {MAX_REGISTRY_RESPONSE_BYTES} bytes"),
            ));
        }
        let text = String::from_utf8_lossy(&body).into_owned();
        if text.trim().is_empty() {
            return Err(LookupError::protocol(server, "empty response"));
        }
        Ok(text)
    }
}
