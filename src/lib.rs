//! domain_intel library: domain age and blocklist reputation
//!
//! For each domain this library answers two questions concurrently:
//!
//! - How old is it? The authoritative registry is queried over WHOIS and the
//!   earliest creation date in the record becomes an approximate age.
//! - Is its address on spam blocklists? The domain's IPv4 address is checked
//!   against a set of DNSBL providers and summarized as a spam score.
//!
//! # Example
//!
//! ```no_run
//! use domain_intel::{Config, DomainIntelligenceEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DomainIntelligenceEngine::from_config(&Config::default())?;
//! let report = engine.analyze("https://www.example.com/").await?;
//! println!("{} is {} old", report.domain, report.age_display());
//! println!("{} ({})", report.reputation_summary(), report.score_display());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
pub mod config;
pub mod dns;
pub mod dnsbl;
pub mod domain;
pub mod engine;
pub mod error_handling;
pub mod initialization;
pub mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt, OutputFormat};
pub use dnsbl::{BlocklistResult, BlocklistStatus, ReputationReport};
pub use domain::{normalize_domain, Domain};
pub use engine::{
    Clock, DomainIntelligenceEngine, DomainIntelligenceReport, ErrorAnnotation, SystemClock,
};
pub use error_handling::{ErrorKind, LookupError};
pub use whois::{AgeComponents, RegistrationInfo};
