//! Single-provider DNSBL query.
//!
//! An IPv4 address `a.b.c.d` is listed on zone `Z` when `d.c.b.a.Z` has an A
//! record. NXDOMAIN means not listed; anything else is indeterminate.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::types::BlocklistResult;
use crate::dns::{DnsAnswer, DnsBackend};
use crate::error_handling::ErrorKind;

/// Queries one blocklist provider per call.
#[derive(Clone)]
pub struct BlocklistClient {
    dns: Arc<dyn DnsBackend>,
    timeout: Duration,
}

impl BlocklistClient {
    /// Creates a client whose queries are bounded by `timeout`.
    pub fn new(dns: Arc<dyn DnsBackend>, timeout: Duration) -> Self {
        Self { dns, timeout }
    }

    /// Builds the reversed-octet query name ("192.0.2.1" -> "1.2.0.192.<zone>").
    pub fn query_name(ip: Ipv4Addr, provider: &str) -> String {
        let [a, b, c, d] = ip.octets();
        format!("{d}.{c}.{b}.{a}.{}", provider.trim_end_matches('.'))
    }

    /// Asks `provider` whether `ip` is listed.
    ///
    /// Never fails: timeouts and resolver errors become `Indeterminate`
    /// results carrying the failure kind.
    pub async fn query(&self, ip: Ipv4Addr, provider: &str) -> BlocklistResult {
        let name = Self::query_name(ip, provider);
        let started = Instant::now();
        let answer = tokio::time::timeout(self.timeout, self.dns.lookup_ipv4(&name))
            .await
            .unwrap_or(DnsAnswer::TimedOut);
        let latency = started.elapsed();

        let result = match answer {
            DnsAnswer::Addresses(codes) if codes.is_empty() => {
                BlocklistResult::not_listed(provider, latency)
            }
            DnsAnswer::Addresses(codes) => {
                if codes.iter().any(|code| is_refusal_code(*code)) {
                    let mut result = BlocklistResult::indeterminate(
                        provider,
                        latency,
                        ErrorKind::Indeterminate,
                        format!("provider refused the query ({})", join_codes(&codes)),
                    );
                    result.return_codes = codes;
                    result
                } else {
                    BlocklistResult::listed(provider, latency, codes)
                }
            }
            DnsAnswer::NoSuchName => BlocklistResult::not_listed(provider, latency),
            DnsAnswer::TimedOut => BlocklistResult::indeterminate(
                provider,
                latency,
                ErrorKind::Timeout,
                format!("no answer within {:?}", self.timeout),
            ),
            DnsAnswer::Failed(reason) => {
                BlocklistResult::indeterminate(provider, latency, ErrorKind::Indeterminate, reason)
            }
        };

        log::debug!(
            "DNSBL {name}: {} in {}ms",
            result.status.as_str(),
            latency.as_millis()
        );
        result
    }
}

/// 127.255.255.0/24 is how DNSBL operators say "not answering you"
/// (public resolver, rate limit, unregistered key); it is not a listing.
fn is_refusal_code(code: Ipv4Addr) -> bool {
    let [a, b, c, _] = code.octets();
    a == 127 && b == 255 && c == 255
}

fn join_codes(codes: &[Ipv4Addr]) -> String {
    codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
