// whois/mod.rs
// Registry (WHOIS) lookups and creation-date extraction

//! Registration metadata via WHOIS.
//!
//! - `RegistryLookupClient` selects the authoritative registry for a domain
//!   and fetches its raw record over TCP port 43
//! - `extract_creation_date` / `registration_info` turn that record into a
//!   creation timestamp and an approximate age

mod client;
mod parse;
mod servers;
mod types;

// Re-export public API
pub use client::{RegistryLookupClient, RegistrySettings};
pub use parse::{extract_creation_date, registration_info};
pub use types::{AgeComponents, RawRegistryRecord, RegistrationInfo};
