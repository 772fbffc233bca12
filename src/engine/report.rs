//! The combined per-domain report.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dnsbl::ReputationReport;
use crate::domain::Domain;
use crate::error_handling::{ErrorKind, LookupError};
use crate::whois::RegistrationInfo;

/// Origin recorded for failures of the registry branch
pub const REGISTRY_ORIGIN: &str = "registry";
/// Origin recorded for failures of the reputation branch
pub const REPUTATION_ORIGIN: &str = "reputation";

/// One failure noted while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorAnnotation {
    pub kind: ErrorKind,
    /// Branch name or blocklist provider host
    pub origin: String,
    pub message: String,
}

/// Everything learned about one domain.
///
/// A branch that failed leaves its field `None`; the failure is listed in
/// `errors` and explained in `annotations`.
///
/// Reports are assembled by the engine; failures cannot be added afterwards:
///
/// ```compile_fail
/// use domain_intel::{DomainIntelligenceReport, ErrorKind};
///
/// fn forge(report: &mut DomainIntelligenceReport) {
///     report.annotate(ErrorKind::Timeout, "registry", "forged");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainIntelligenceReport {
    pub domain: Domain,
    pub registration: Option<RegistrationInfo>,
    pub reputation: Option<ReputationReport>,
    pub errors: BTreeSet<ErrorKind>,
    pub annotations: Vec<ErrorAnnotation>,
}

impl DomainIntelligenceReport {
    pub(crate) fn new(domain: Domain) -> Self {
        Self {
            domain,
            registration: None,
            reputation: None,
            errors: BTreeSet::new(),
            annotations: Vec::new(),
        }
    }

    pub(crate) fn annotate(&mut self, kind: ErrorKind, origin: &str, message: impl Into<String>) {
        self.errors.insert(kind);
        self.annotations.push(ErrorAnnotation {
            kind,
            origin: origin.to_string(),
            message: message.into(),
        });
    }

    pub(crate) fn record_failure(&mut self, origin: &str, error: &LookupError) {
        self.annotate(error.kind(), origin, error.to_string());
    }

    /// Annotations from one origin, in the order they were recorded.
    pub fn annotations_from<'a>(
        &'a self,
        origin: &'a str,
    ) -> impl Iterator<Item = &'a ErrorAnnotation> + 'a {
        self.annotations.iter().filter(move |a| a.origin == origin)
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.contains(&kind)
    }

    pub fn creation_display(&self) -> String {
        self.registration
            .as_ref()
            .map(RegistrationInfo::creation_display)
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn age_display(&self) -> String {
        self.registration
            .as_ref()
            .map(RegistrationInfo::age_display)
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn reputation_summary(&self) -> String {
        self.reputation
            .as_ref()
            .map(ReputationReport::summary)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn score_display(&self) -> String {
        self.reputation
            .as_ref()
            .map(ReputationReport::score_display)
            .unwrap_or_else(|| "N/A".to_string())
    }
}
