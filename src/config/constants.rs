//! Configuration constants.
//!
//! Defaults for timeouts, retry behavior and the blocklist provider set. The
//! library `Config` and the CLI both start from these values.

use std::time::Duration;

// Registry (WHOIS) lookups
/// Well-known WHOIS port
pub const WHOIS_PORT: u16 = 43;
/// Deadline for a single registry attempt (connect + query + full read)
pub const REGISTRY_TIMEOUT_SECS: u64 = 5;
/// Retries after the initial attempt when a registry is unreachable
/// Set to 2 = initial attempt + 2 retries (total 3 attempts)
pub const REGISTRY_MAX_RETRIES: usize = 2;
/// Base of the exponential backoff between registry attempts
pub const RETRY_BACKOFF_BASE: u64 = 2;
/// Multiplier applied to each backoff step, in milliseconds
/// With base 2 this gives delays of 200ms, 400ms, ...
pub const RETRY_BACKOFF_FACTOR_MS: u64 = 100;
/// Upper bound for a single backoff delay
pub const RETRY_MAX_DELAY_SECS: u64 = 2;
/// Largest registry response we are willing to buffer (1MB)
/// Real registry records are a few KB; anything larger is treated as a protocol error
pub const MAX_REGISTRY_RESPONSE_BYTES: usize = 1024 * 1024;
/// Registry used to discover the WHOIS server of unmapped TLDs
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";

// Blocklist (DNSBL) lookups
/// Timeout for a single blocklist or A-record query in milliseconds
pub const DNS_QUERY_TIMEOUT_MS: u64 = 2000;

/// Blocklists queried when none are configured.
pub const DEFAULT_BLOCKLISTS: &[&str] = &[
    "zen.spamhaus.org",
    "b.barracudacentral.org",
    "bl.spamcop.net",
];

// Whole-request budget
/// Overall deadline for one `analyze` call
/// Registry branch: 3 attempts are normally settled well inside this; the
/// reputation branch needs one A lookup plus one round of parallel DNSBL queries
pub const ANALYSIS_DEADLINE: Duration = Duration::from_secs(8);

/// Maximum number of registry retries accepted by config validation
pub const MAX_CONFIGURABLE_RETRIES: usize = 5;

/// Inputs analyzed at the same time by `analyze_many`
pub const MAX_CONCURRENT_ANALYSES: usize = 4;
