//! WHOIS data structures.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Domain;

/// Unparsed registry answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRegistryRecord {
    /// Name sent to the registry (the registrable domain)
    pub query: String,
    /// Registry server that answered
    pub registry: String,
    /// When the answer was received
    pub queried_at: DateTime<Utc>,
    /// Response body, decoded lossily as UTF-8
    pub text: String,
}

/// Approximate age of a registration.
///
/// Uses the 365-day year / 30-day month model: years = days / 365,
/// months = (days % 365) / 30, days = (days % 365) % 30. This is deliberately
/// not calendar-aware so the output stays stable and easy to test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeComponents {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub total_days: i64,
}

impl AgeComponents {
    /// Age of something created at `created` as seen at `now`.
    ///
    /// A creation date in the future counts as zero age.
    pub fn between(created: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_days((now - created).num_days().max(0))
    }

    pub fn from_days(total_days: i64) -> Self {
        let remainder = total_days % 365;
        Self {
            years: total_days / 365,
            months: remainder / 30,
            days: remainder % 30,
            total_days,
        }
    }
}

impl fmt::Display for AgeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

/// Registration facts extracted for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationInfo {
    pub domain: Domain,
    /// Registry server the record came from
    pub registry: String,
    /// Earliest creation timestamp found in the record
    pub creation_date: Option<DateTime<Utc>>,
    /// Age at analysis time, present whenever `creation_date` is
    pub age: Option<AgeComponents>,
}

impl RegistrationInfo {
    pub fn new(
        domain: Domain,
        registry: String,
        creation_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            domain,
            registry,
            age: creation_date.map(|created| AgeComponents::between(created, now)),
            creation_date,
        }
    }

    /// Creation date for display, or "unknown".
    pub fn creation_display(&self) -> String {
        self.creation_date
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Age for display, or "unknown".
    pub fn age_display(&self) -> String {
        self.age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
