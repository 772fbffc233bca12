//! The DNS seam.

use std::net::Ipv4Addr;

use async_trait::async_trait;

/// Outcome of an A-record query.
///
/// Keeps "the name does not exist" apart from every other failure, which is
/// the distinction blocklist scoring depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsAnswer {
    /// The name resolved to one or more IPv4 addresses.
    Addresses(Vec<Ipv4Addr>),
    /// NXDOMAIN, or the name exists without A records.
    NoSuchName,
    /// The resolver gave up waiting.
    TimedOut,
    /// Any other resolver or server failure.
    Failed(String),
}

/// Issues A-record queries.
///
/// Implementations must be cheap to share across tasks; the engine holds one
/// behind an `Arc` and queries it concurrently.
#[async_trait]
pub trait DnsBackend: Send + Sync {
    /// Looks up the A records of `name`.
    async fn lookup_ipv4(&self, name: &str) -> DnsAnswer;
}
