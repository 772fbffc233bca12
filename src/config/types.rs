//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    ANALYSIS_DEADLINE, DEFAULT_BLOCKLISTS, DNS_QUERY_TIMEOUT_MS, MAX_CONFIGURABLE_RETRIES,
    REGISTRY_MAX_RETRIES, REGISTRY_TIMEOUT_SECS, WHOIS_PORT,
};
use crate::domain::validate_hostname;
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the CLI prints finished reports.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Labelled lines, one field per line
    Plain,
    /// A JSON array with one entry per input
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use domain_intel::Config;
///
/// let config = Config {
///     blocklists: vec!["zen.spamhaus.org".to_string()],
///     deadline_ms: 5_000,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Report output format (CLI only)
    pub output: OutputFormat,

    /// DNSBL zones to query, in report order
    pub blocklists: Vec<String>,

    /// Deadline for one registry attempt in seconds
    pub registry_timeout_secs: u64,

    /// Retries after the first registry attempt
    pub registry_retries: usize,

    /// Timeout for each DNS query in milliseconds
    pub dns_timeout_ms: u64,

    /// Overall deadline for one analysis in milliseconds
    pub deadline_ms: u64,

    /// TCP port registries are contacted on
    pub whois_port: u16,

    /// Query this WHOIS server for every domain instead of the suffix's registry
    pub registry_host: Option<String>,

    /// Registry used when the suffix has no known or discoverable registry
    pub fallback_registry: Option<String>,

    /// Ask IANA for the registry of suffixes missing from the built-in table
    pub iana_discovery: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: OutputFormat::Plain,
            blocklists: DEFAULT_BLOCKLISTS.iter().map(|s| s.to_string()).collect(),
            registry_timeout_secs: REGISTRY_TIMEOUT_SECS,
            registry_retries: REGISTRY_MAX_RETRIES,
            dns_timeout_ms: DNS_QUERY_TIMEOUT_MS,
            deadline_ms: ANALYSIS_DEADLINE.as_millis() as u64,
            whois_port: WHOIS_PORT,
            registry_host: None,
            fallback_registry: None,
            iana_discovery: true,
        }
    }
}

impl Config {
    /// Deadline for one registry attempt.
    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry_timeout_secs)
    }

    /// Timeout for a single DNS query.
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    /// Overall analysis deadline.
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    /// Checks that the configuration can drive an analysis.
    ///
    /// # Errors
    ///
    /// Returns the first offending field together with an actionable message.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.registry_timeout_secs == 0 {
            return Err(ConfigValidationError::new(
                "registry_timeout_secs",
                "registry timeout must be greater than 0 seconds",
            ));
        }
        if self.dns_timeout_ms == 0 {
            return Err(ConfigValidationError::new(
                "dns_timeout_ms",
                "DNS timeout must be greater than 0 milliseconds",
            ));
        }
        if self.deadline_ms < self.dns_timeout_ms {
            return Err(ConfigValidationError::new(
                "deadline_ms",
                format!(
                    "deadline ({}ms) must be at least the DNS timeout ({}ms)",
                    self.deadline_ms, self.dns_timeout_ms
                ),
            ));
        }
        if self.registry_retries > MAX_CONFIGURABLE_RETRIES {
            return Err(ConfigValidationError::new(
                "registry_retries",
                format!("registry retries must be at most {MAX_CONFIGURABLE_RETRIES}"),
            ));
        }
        if self.whois_port == 0 {
            return Err(ConfigValidationError::new(
                "whois_port",
                "WHOIS port must be between 1 and 65535",
            ));
        }
        if self.blocklists.is_empty() {
            return Err(ConfigValidationError::new(
                "blocklists",
                "at least one blocklist must be configured (e.g. --blocklist zen.spamhaus.org)",
            ));
        }
        for zone in &self.blocklists {
            if let Err(reason) = validate_hostname(zone) {
                return Err(ConfigValidationError::new(
                    "blocklists",
                    format!("blocklist '{zone}' is not a valid hostname: {reason}"),
                ));
            }
        }
        Ok(())
    }
}

/// Command-line options for the `domain_intel` binary.
#[derive(Debug, Parser)]
#[command(
    name = "domain_intel",
    version,
    about = "Reports a domain's registration age and DNS blocklist reputation"
)]
pub struct Opt {
    /// Domains (or URLs) to analyze
    #[arg(required = true, value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// DNSBL zone to query (repeatable; replaces the default set)
    #[arg(long = "blocklist", value_name = "HOST")]
    pub blocklists: Vec<String>,

    /// Deadline for a single registry attempt in seconds
    #[arg(long, default_value_t = REGISTRY_TIMEOUT_SECS)]
    pub registry_timeout_secs: u64,

    /// Retries after the first registry attempt
    #[arg(long, default_value_t = REGISTRY_MAX_RETRIES)]
    pub registry_retries: usize,

    /// Timeout for each DNS query in milliseconds
    #[arg(long, default_value_t = DNS_QUERY_TIMEOUT_MS)]
    pub dns_timeout_ms: u64,

    /// Overall deadline per domain in milliseconds
    #[arg(long, default_value_t = ANALYSIS_DEADLINE.as_millis() as u64)]
    pub deadline_ms: u64,

    /// TCP port used to contact registries
    #[arg(long, default_value_t = WHOIS_PORT)]
    pub whois_port: u16,

    /// Query this WHOIS server for every domain
    #[arg(long, value_name = "HOST")]
    pub registry: Option<String>,

    /// WHOIS server used when a suffix has no known registry
    #[arg(long, value_name = "HOST")]
    pub fallback_registry: Option<String>,

    /// Do not ask IANA for the registry of unknown suffixes
    #[arg(long)]
    pub no_iana_discovery: bool,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        let blocklists = if opt.blocklists.is_empty() {
            Config::default().blocklists
        } else {
            opt.blocklists
        };
        Config {
            log_level: opt.log_level,
            log_format: opt.log_format,
            output: opt.output,
            blocklists,
            registry_timeout_secs: opt.registry_timeout_secs,
            registry_retries: opt.registry_retries,
            dns_timeout_ms: opt.dns_timeout_ms,
            deadline_ms: opt.deadline_ms,
            whois_port: opt.whois_port,
            registry_host: opt.registry,
            fallback_registry: opt.fallback_registry,
            iana_discovery: !opt.no_iana_discovery,
        }
    }
}
