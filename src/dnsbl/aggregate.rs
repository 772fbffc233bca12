//! Fan-out over all configured blocklist providers.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{timeout_at, Instant};

use super::query::BlocklistClient;
use super::types::{BlocklistResult, ReputationReport};
use crate::dns::{resolve_host_to_ipv4, DnsBackend};
use crate::domain::Domain;
use crate::error_handling::{ErrorKind, LookupError};

/// Resolves a domain and checks its address against every provider.
#[derive(Clone)]
pub struct ReputationAggregator {
    dns: Arc<dyn DnsBackend>,
    client: BlocklistClient,
    providers: Vec<String>,
    dns_timeout: Duration,
    budget: Duration,
}

impl ReputationAggregator {
    /// `providers` fixes the order of results; `budget` bounds a whole
    /// assessment when no external deadline is given.
    pub fn new(
        dns: Arc<dyn DnsBackend>,
        providers: Vec<String>,
        dns_timeout: Duration,
        budget: Duration,
    ) -> Self {
        Self {
            client: BlocklistClient::new(dns.clone(), dns_timeout),
            dns,
            providers,
            dns_timeout,
            budget,
        }
    }

    /// Resolves `domain` to IPv4 and assesses that address.
    ///
    /// # Errors
    ///
    /// `DnsResolutionFailed` when the domain has no usable A record; without
    /// an address there is nothing to look up.
    pub async fn assess(&self, domain: &Domain) -> Result<ReputationReport, LookupError> {
        self.assess_until(domain, Instant::now() + self.budget).await
    }

    /// Like `assess`, but everything settles by `deadline`.
    ///
    /// Provider slots still pending at the deadline are reported as
    /// `Indeterminate` with a `Timeout` failure; finished slots are kept.
    ///
    /// # Errors
    ///
    /// `DnsResolutionFailed` as for `assess`; `Timeout` if the deadline passes
    /// before the domain resolves.
    pub async fn assess_until(
        &self,
        domain: &Domain,
        deadline: Instant,
    ) -> Result<ReputationReport, LookupError> {
        let started = Instant::now();
        let ip = timeout_at(
            deadline,
            resolve_host_to_ipv4(self.dns.as_ref(), domain.as_str(), self.dns_timeout),
        )
        .await
        .map_err(|_| LookupError::timeout(format!("A lookup for {domain}"), started.elapsed()))??;
        log::debug!("{domain} resolved to {ip}");

        let report = self.assess_ip_until(ip, deadline).await;
        log::info!(
            "Reputation for {domain} ({ip}): {} [{}]",
            report.summary(),
            report.score_display()
        );
        Ok(report)
    }

    /// Checks an address that is already known.
    pub async fn assess_ip(&self, ip: Ipv4Addr) -> ReputationReport {
        self.assess_ip_until(ip, Instant::now() + self.budget).await
    }

    async fn assess_ip_until(&self, ip: Ipv4Addr, deadline: Instant) -> ReputationReport {
        let started = Instant::now();
        // join_all yields outputs in input order, one slot per provider
        let slots = self.providers.iter().map(|provider| async move {
            match timeout_at(deadline, self.client.query(ip, provider)).await {
                Ok(result) => result,
                Err(_) => BlocklistResult::indeterminate(
                    provider,
                    started.elapsed(),
                    ErrorKind::Timeout,
                    "analysis deadline reached before the provider answered",
                ),
            }
        });
        let results = join_all(slots).await;
        ReputationReport::from_results(ip, results)
    }
}
