//! Blocklist result types and spam-score arithmetic.

use std::net::Ipv4Addr;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error_handling::ErrorKind;

/// Membership of one IP on one blocklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlocklistStatus {
    Listed,
    NotListed,
    /// The provider could not give an answer; excluded from the score.
    Indeterminate,
}

impl BlocklistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlocklistStatus::Listed => "listed",
            BlocklistStatus::NotListed => "not listed",
            BlocklistStatus::Indeterminate => "indeterminate",
        }
    }
}

/// Result of querying one provider for one IP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlocklistResult {
    /// DNSBL zone queried (e.g. "zen.spamhaus.org")
    pub provider: String,
    pub status: BlocklistStatus,
    /// Time from issuing the query to settling it
    #[serde(rename = "latency_ms", serialize_with = "serialize_millis")]
    pub latency: Duration,
    /// A records returned by the provider; non-empty only when listed or refused
    pub return_codes: Vec<Ipv4Addr>,
    /// Why the result is indeterminate (`Timeout` or `Indeterminate`)
    pub failure: Option<ErrorKind>,
    /// Human-readable failure detail
    pub detail: Option<String>,
}

impl BlocklistResult {
    pub(crate) fn listed(provider: &str, latency: Duration, return_codes: Vec<Ipv4Addr>) -> Self {
        Self {
            provider: provider.to_string(),
            status: BlocklistStatus::Listed,
            latency,
            return_codes,
            failure: None,
            detail: None,
        }
    }

    pub(crate) fn not_listed(provider: &str, latency: Duration) -> Self {
        Self {
            provider: provider.to_string(),
            status: BlocklistStatus::NotListed,
            latency,
            return_codes: Vec::new(),
            failure: None,
            detail: None,
        }
    }

    pub(crate) fn indeterminate(
        provider: &str,
        latency: Duration,
        failure: ErrorKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.to_string(),
            status: BlocklistStatus::Indeterminate,
            latency,
            return_codes: Vec::new(),
            failure: Some(failure),
            detail: Some(detail.into()),
        }
    }

    pub fn is_listed(&self) -> bool {
        self.status == BlocklistStatus::Listed
    }
}

/// Aggregated blocklist outcome for one IP.
///
/// `results` is always in configured provider order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationReport {
    pub ip_address: Ipv4Addr,
    pub results: Vec<BlocklistResult>,
    pub listed_count: usize,
    pub total_providers: usize,
    pub indeterminate_count: usize,
    /// listed / (total - indeterminate) * 100; `None` when nothing was determinate
    pub score_percent: Option<f64>,
}

impl ReputationReport {
    /// Builds the report and its score from per-provider results.
    pub fn from_results(ip_address: Ipv4Addr, results: Vec<BlocklistResult>) -> Self {
        let total_providers = results.len();
        let listed_count = results.iter().filter(|r| r.is_listed()).count();
        let indeterminate_count = results
            .iter()
            .filter(|r| r.status == BlocklistStatus::Indeterminate)
            .count();
        let score_percent = spam_score(listed_count, total_providers, indeterminate_count);
        Self {
            ip_address,
            results,
            listed_count,
            total_providers,
            indeterminate_count,
            score_percent,
        }
    }

    /// Providers that list the IP, in configured order.
    pub fn listed_providers(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| r.is_listed())
            .map(|r| r.provider.as_str())
    }

    /// One-line verdict, e.g. "Listed on 1 out of 3 spam lists".
    pub fn summary(&self) -> String {
        match self.score_percent {
            None => "N/A (no blocklist gave an answer)".to_string(),
            Some(_) if self.listed_count == 0 => "Not listed on common spam lists.".to_string(),
            Some(_) => format!(
                "Listed on {} out of {} spam lists",
                self.listed_count, self.total_providers
            ),
        }
    }

    /// Score as displayed: "33.33%", "0%" or "N/A".
    pub fn score_display(&self) -> String {
        match self.score_percent {
            None => "N/A".to_string(),
            Some(_) if self.listed_count == 0 => "0%".to_string(),
            Some(score) => format!("{score:.2}%"),
        }
    }
}

/// Percentage of determinate providers that list the IP.
pub fn spam_score(listed: usize, total: usize, indeterminate: usize) -> Option<f64> {
    let evaluated = total.saturating_sub(indeterminate);
    if evaluated == 0 {
        return None;
    }
    Some(listed as f64 / evaluated as f64 * 100.0)
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
