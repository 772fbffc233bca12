//! DNS blocklist (DNSBL) reputation checks.
//!
//! - `BlocklistClient` asks a single provider about a single IPv4 address
//! - `ReputationAggregator` resolves a domain, queries every configured
//!   provider concurrently and scores the outcome
//!
//! The spam score counts only providers that gave a definite answer:
//! `listed / (total - indeterminate) * 100`.

mod aggregate;
mod query;
mod types;

// Re-export public API
pub use aggregate::ReputationAggregator;
pub use query::BlocklistClient;
pub use types::{spam_score, BlocklistResult, BlocklistStatus, ReputationReport};
