//! Creation-date extraction from raw registry records.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use super::types::{RawRegistryRecord, RegistrationInfo};
use crate::domain::Domain;

/// Field labels registries use for the creation timestamp.
const CREATION_LABELS: &[&str] = &[
    "domain name commencement date",
    "domain registration date",
    "domain record activated",
    "domain create date",
    "domain_dateregistered",
    "registration date",
    "registration time",
    "registered date",
    "registered on",
    "record created",
    "creation date",
    "creation_date",
    "created date",
    "created_date",
    "created on",
    "create date",
    "registered",
    "created",
    // JPRS default (Japanese) output
    "登録年月日",
];

/// Matches `Label: value` and the bracketed `[Label] value` style.
static CREATION_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    let labels = CREATION_LABELS
        .iter()
        .map(|label| label.replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)^\s*(?:\[(?:{labels})\]|(?:{labels})\s*:)\s*(?P<value>.*?)\s*$"
    ))
    .expect("creation field pattern is valid")
});

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d-%b-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%b-%Y",
    "%d.%m.%Y",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d %b %Y",
    // registro.br
    "%Y%m%d",
];

/// Returns the earliest well-formed creation timestamp in the record.
///
/// Records often carry the field more than once (registry and registrar
/// sections); all candidates are considered and the minimum wins. `None`
/// means the record has no usable creation field, which is a normal outcome
/// for "no match" notices and registries that withhold the date.
pub fn extract_creation_date(record: &RawRegistryRecord) -> Option<DateTime<Utc>> {
    creation_date_candidates(&record.text).into_iter().min()
}

/// Parses the record and computes the age as of `now`.
pub fn registration_info(
    domain: Domain,
    record: &RawRegistryRecord,
    now: DateTime<Utc>,
) -> RegistrationInfo {
    let creation_date = extract_creation_date(record);
    if creation_date.is_none() {
        log::debug!(
            "No creation date in {} byte record from {} for {}",
            record.text.len(),
            record.registry,
            record.query
        );
    }
    RegistrationInfo::new(domain, record.registry.clone(), creation_date, now)
}

fn creation_date_candidates(text: &str) -> Vec<DateTime<Utc>> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with(['%', '#']))
        .filter_map(|line| CREATION_FIELD.captures(line))
        .filter_map(|caps| caps.name("value").and_then(|v| parse_timestamp(v.as_str())))
        .collect()
}

/// Parses a field value, tolerating trailing zone annotations.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(dt) = parse_date_string(value) {
        return Some(dt);
    }

    // "2001/01/01 00:00:00 (JST)", "2003-03-17 12:20:05 UTC"
    let unannotated = value.split(" (").next().unwrap_or(value).trim_end();
    let unannotated = unannotated
        .strip_suffix(" UTC")
        .or_else(|| unannotated.strip_suffix(" GMT"))
        .unwrap_or(unannotated);
    if unannotated != value {
        if let Some(dt) = parse_date_string(unannotated) {
            return Some(dt);
        }
    }

    // Date followed by free text ("1997-09-15 by registrar")
    value
        .split_whitespace()
        .next()
        .filter(|first| *first != value)
        .and_then(parse_date_string)
}

/// Tries each known format in priority order.
fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}
