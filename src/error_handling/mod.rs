//! Error handling.
//!
//! This module provides:
//! - `ErrorKind`, the categories surfaced in a report
//! - `LookupError`, the typed failure of a lookup stage
//! - Initialization and configuration errors
//! - The registry retry strategy

mod retry;
mod types;

// Re-export public API
pub use retry::get_retry_strategy;
pub(crate) use retry::is_retriable_error;
pub use types::{ConfigValidationError, ErrorKind, InitializationError, LookupError};
