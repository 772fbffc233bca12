//! DNS resolution.
//!
//! Every DNS query the crate issues goes through the `DnsBackend` trait:
//! - A-record resolution of the analyzed domain
//! - Reversed-octet blocklist queries
//!
//! `HickoryBackend` is the production implementation on top of
//! `hickory-resolver`; tests substitute in-memory backends.

mod backend;
mod resolution;

// Re-export public API
pub use backend::{DnsAnswer, DnsBackend};
pub use resolution::{resolve_host_to_ipv4, HickoryBackend};

#[cfg(test)]
mod tests;
