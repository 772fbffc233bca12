//! Per-domain analysis.
//!
//! `DomainIntelligenceEngine::analyze` normalizes the input, then runs the
//! registry branch (WHOIS lookup and creation-date parsing) and the
//! reputation branch (A lookup and blocklist fan-out) as two spawned tasks
//! under one shared deadline. Either branch may fail or panic without
//! affecting the other; its failure ends up in the report.

mod clock;
mod report;

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::time::{timeout_at, Instant};

use crate::config::{Config, MAX_CONCURRENT_ANALYSES};
use crate::dns::{DnsBackend, HickoryBackend};
use crate::dnsbl::ReputationAggregator;
use crate::domain::normalize_domain;
use crate::error_handling::{ErrorKind, InitializationError, LookupError};
use crate::initialization::init_resolver;
use crate::whois::{registration_info, RegistryLookupClient, RegistrySettings};

pub use clock::{Clock, FixedClock, SystemClock};
pub use report::{DomainIntelligenceReport, ErrorAnnotation, REGISTRY_ORIGIN, REPUTATION_ORIGIN};

/// Combines registry age and blocklist reputation for a domain.
pub struct DomainIntelligenceEngine {
    registry: Arc<RegistryLookupClient>,
    reputation: Arc<ReputationAggregator>,
    clock: Arc<dyn Clock>,
    deadline: Duration,
}

impl DomainIntelligenceEngine {
    /// Builds an engine backed by the system DNS resolver and the wall clock.
    ///
    /// # Errors
    ///
    /// `ConfigError` if `config` does not validate, `DnsResolverError` if the
    /// resolver cannot be set up.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        config.validate()?;
        let resolver = init_resolver(config.dns_timeout())?;
        Ok(Self::new(
            config,
            Arc::new(HickoryBackend::new(resolver)),
            Arc::new(SystemClock),
        ))
    }

    /// Builds an engine on an explicit DNS backend and clock.
    pub fn new(config: &Config, dns: Arc<dyn DnsBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: Arc::new(
                RegistryLookupClient::new(RegistrySettings::from(config))
                    .with_clock(Arc::clone(&clock)),
            ),
            reputation: Arc::new(ReputationAggregator::new(
                dns,
                config.blocklists.clone(),
                config.dns_timeout(),
                config.deadline(),
            )),
            clock,
            deadline: config.deadline(),
        }
    }

    /// Analyzes one raw input ("https://www.example.com/path", "example.com").
    ///
    /// Returns once both branches have settled or the deadline has passed,
    /// whichever comes first. Work outstanding at the deadline is dropped:
    /// the registry half is reported missing with `Timeout` and unfinished
    /// blocklist slots become indeterminate.
    ///
    /// # Errors
    ///
    /// Only `InvalidDomainFormat`; every later failure is recorded in the
    /// report instead.
    pub async fn analyze(&self, raw: &str) -> Result<DomainIntelligenceReport, LookupError> {
        let domain = normalize_domain(raw)?;
        let deadline = Instant::now() + self.deadline;
        log::info!("Analyzing {domain}");

        let registry_branch = {
            let client = Arc::clone(&self.registry);
            let domain = domain.clone();
            tokio::spawn(async move { timeout_at(deadline, client.lookup(&domain)).await })
        };
        let reputation_branch = {
            let aggregator = Arc::clone(&self.reputation);
            let domain = domain.clone();
            tokio::spawn(async move { aggregator.assess_until(&domain, deadline).await })
        };
        let (registry_outcome, reputation_outcome) = tokio::join!(registry_branch, reputation_branch);

        let mut report = DomainIntelligenceReport::new(domain.clone());

        match registry_outcome {
            Ok(Ok(Ok(record))) => {
                let info = registration_info(domain.clone(), &record, self.clock.now());
                log::info!("Registration for {domain}: created {}", info.creation_display());
                report.registration = Some(info);
            }
            Ok(Ok(Err(e))) => {
                log::warn!("Registry lookup for {domain} failed: {e}");
                report.record_failure(REGISTRY_ORIGIN, &e);
            }
            Ok(Err(_)) => {
                let e = LookupError::timeout(format!("registry lookup for {domain}"), self.deadline);
                log::warn!("{e}");
                report.record_failure(REGISTRY_ORIGIN, &e);
            }
            Err(join_error) => {
                log::error!("Registry task for {domain} failed: {join_error}");
                report.annotate(
                    ErrorKind::Indeterminate,
                    REGISTRY_ORIGIN,
                    format!("registry task failed: {join_error}"),
                );
            }
        }

        match reputation_outcome {
            Ok(Ok(reputation)) => {
                for result in &reputation.results {
                    if let Some(kind) = result.failure {
                        report.annotate(
                            kind,
                            &result.provider,
                            result.detail.clone().unwrap_or_default(),
                        );
                    }
                }
                report.reputation = Some(reputation);
            }
            Ok(Err(e)) => {
                log::warn!("Reputation check for {domain} failed: {e}");
                report.record_failure(REPUTATION_ORIGIN, &e);
            }
            Err(join_error) => {
                log::error!("Reputation task for {domain} failed: {join_error}");
                report.annotate(
                    ErrorKind::Indeterminate,
                    REPUTATION_ORIGIN,
                    format!("reputation task failed: {join_error}"),
                );
            }
        }

        Ok(report)
    }

    /// Analyzes several inputs; results are in input order.
    pub async fn analyze_many<S: AsRef<str>>(
        &self,
        inputs: &[S],
    ) -> Vec<Result<DomainIntelligenceReport, LookupError>> {
        stream::iter(inputs)
            .map(|input| self.analyze(input.as_ref()))
            .buffered(MAX_CONCURRENT_ANALYSES)
            .collect()
            .await
    }
}
