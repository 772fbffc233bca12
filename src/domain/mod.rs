//! Domain normalization and validation.
//!
//! Turns whatever a user typed ("https://www.Example.com/path", " example.com. ")
//! into a validated, lowercase ASCII hostname. IDN labels are converted to
//! punycode by the `url` host parser; the Public Suffix List (`psl`) supplies
//! the registrable domain sent to registries.
//!
//! Key functions:
//! - `normalize_domain()` - Builds a `Domain` from raw input
//! - `validate_hostname()` - Checks label length and character-set rules

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use url::{Host, Url};

use crate::error_handling::LookupError;

/// Maximum length of a full hostname (RFC 1035)
const MAX_HOSTNAME_LENGTH: usize = 253;
/// Maximum length of a single label (RFC 1035)
const MAX_LABEL_LENGTH: usize = 63;

/// A validated hostname.
///
/// Lowercase ASCII, no scheme, no leading `www.`, no trailing dot, at least two
/// labels. Only constructed through `normalize_domain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    /// The hostname as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The registrable part of the name ("mail.example.co.uk" -> "example.co.uk").
    ///
    /// Falls back to the full name when the Public Suffix List has no opinion
    /// (e.g. the name itself is a public suffix).
    pub fn registrable(&self) -> &str {
        psl::domain_str(&self.0).unwrap_or(&self.0)
    }

    /// The top-level label ("example.co.uk" -> "uk").
    pub fn tld(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Domain {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_domain(s)
    }
}

/// Normalizes raw user input into a `Domain`.
///
/// Strips a case-insensitive `http://` or `https://` prefix, any path, query,
/// port or userinfo, leading `www.` labels and a single trailing dot, then
/// validates the remaining hostname. Normalizing an already-normalized domain
/// returns it unchanged.
///
/// # Errors
///
/// Returns `LookupError::InvalidDomainFormat` if the input is empty, uses
/// another scheme, is an IP literal, or violates hostname syntax.
pub fn normalize_domain(raw: &str) -> Result<Domain, LookupError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LookupError::invalid_domain(raw, "empty input"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(LookupError::invalid_domain(raw, "contains whitespace"));
    }

    let without_scheme = strip_http_scheme(trimmed);
    if without_scheme.contains("://") {
        return Err(LookupError::invalid_domain(raw, "unsupported scheme"));
    }

    // Let the URL parser isolate the host and apply IDNA mapping.
    let parsed = Url::parse(&format!("http://{without_scheme}"))
        .map_err(|e| LookupError::invalid_domain(raw, e.to_string()))?;
    let host = match parsed.host() {
        Some(Host::Domain(host)) => host.to_string(),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
            return Err(LookupError::invalid_domain(
                raw,
                "IP addresses have no registration record",
            ))
        }
        None => return Err(LookupError::invalid_domain(raw, "no host")),
    };

    let mut host = host.as_str();
    if let Some(stripped) = host.strip_suffix('.') {
        host = stripped;
    }
    while let Some(rest) = host.strip_prefix("www.") {
        // "www.com" is itself a registered name
        if !rest.contains('.') {
            break;
        }
        host = rest;
    }

    validate_hostname(host).map_err(|reason| LookupError::invalid_domain(raw, reason))?;
    Ok(Domain(host.to_ascii_lowercase()))
}

/// Checks hostname syntax: 1-63 character labels of `a-z`, `0-9` and `-`
/// (no leading or trailing hyphen), at most 253 characters, at least two
/// labels and a non-numeric top-level label.
///
/// # Errors
///
/// Returns a human-readable reason for the first rule violated.
pub fn validate_hostname(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty hostname".to_string());
    }
    if name.len() > MAX_HOSTNAME_LENGTH {
        return Err(format!(
            "hostname is {} characters, maximum is {MAX_HOSTNAME_LENGTH}",
            name.len()
        ));
    }

    let labels: Vec<&str> = name.split('.').collect();
    for label in &labels {
        if label.is_empty() {
            return Err("empty label (consecutive or leading dots)".to_string());
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(format!(
                "label '{label}' is {} characters, maximum is {MAX_LABEL_LENGTH}",
                label.len()
            ));
        }
        if let Some(c) = label
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
        {
            return Err(format!("invalid character '{c}' in label '{label}'"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(format!("label '{label}' starts or ends with a hyphen"));
        }
    }

    if labels.len() < 2 {
        return Err("hostname needs at least two labels".to_string());
    }
    if labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return Err("top-level label cannot be numeric".to_string());
    }
    Ok(())
}

fn strip_http_scheme(input: &str) -> &str {
    for scheme in ["http://", "https://"] {
        if input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        {
            return &input[scheme.len()..];
        }
    }
    input
}
