//! Error type definitions.
//!
//! This module defines the error kinds reported to callers and the typed
//! errors raised by each lookup stage.

use std::fmt;
use std::time::Duration;

use log::SetLoggerError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// The supplied configuration cannot drive an analysis.
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] ConfigValidationError),
}

/// A configuration field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending `Config` field
    pub field: &'static str,
    /// What is wrong and what a valid value looks like
    pub message: String,
}

impl ConfigValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Categories of failure surfaced in a report.
///
/// Every `LookupError` maps onto exactly one kind. `Indeterminate` marks a
/// blocklist provider or analysis branch with no usable answer and is never
/// fatal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro, Serialize,
)]
pub enum ErrorKind {
    InvalidDomainFormat,
    NoRegistryForSuffix,
    RegistryUnreachable,
    RegistryProtocolError,
    DnsResolutionFailed,
    Timeout,
    Indeterminate,
}

impl ErrorKind {
    /// Stable identifier used in logs and plain-text output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidDomainFormat => "InvalidDomainFormat",
            ErrorKind::NoRegistryForSuffix => "NoRegistryForSuffix",
            ErrorKind::RegistryUnreachable => "RegistryUnreachable",
            ErrorKind::RegistryProtocolError => "RegistryProtocolError",
            ErrorKind::DnsResolutionFailed => "DnsResolutionFailed",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Indeterminate => "Indeterminate",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one lookup stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The input could not be normalized into a hostname.
    #[error("Invalid domain format '{input}': {reason}")]
    InvalidDomainFormat { input: String, reason: String },

    /// No registry is known or discoverable for the domain's suffix.
    #[error("No registry known for suffix '.{suffix}'")]
    NoRegistryForSuffix { suffix: String },

    /// The registry could not be reached within the attempt budget.
    #[error("Registry {server} unreachable: {reason}")]
    RegistryUnreachable { server: String, reason: String },

    /// The registry answered with something we cannot use.
    #[error("Malformed response from registry {server}: {reason}")]
    RegistryProtocolError { server: String, reason: String },

    /// The domain has no usable IPv4 address.
    #[error("DNS resolution failed for {host}: {reason}")]
    DnsResolutionFailed { host: String, reason: String },

    /// An operation ran past its deadline.
    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: String, after: Duration },
}

impl LookupError {
    /// The report category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::InvalidDomainFormat { .. } => ErrorKind::InvalidDomainFormat,
            LookupError::NoRegistryForSuffix { .. } => ErrorKind::NoRegistryForSuffix,
            LookupError::RegistryUnreachable { .. } => ErrorKind::RegistryUnreachable,
            LookupError::RegistryProtocolError { .. } => ErrorKind::RegistryProtocolError,
            LookupError::DnsResolutionFailed { .. } => ErrorKind::DnsResolutionFailed,
            LookupError::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    pub(crate) fn invalid_domain(input: &str, reason: impl Into<String>) -> Self {
        LookupError::InvalidDomainFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unreachable(server: &str, reason: impl fmt::Display) -> Self {
        LookupError::RegistryUnreachable {
            server: server.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn protocol(server: &str, reason: impl Into<String>) -> Self {
        LookupError::RegistryProtocolError {
            server: server.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn timeout(operation: impl Into<String>, after: Duration) -> Self {
        LookupError::Timeout {
            operation: operation.into(),
            after,
        }
    }
}
