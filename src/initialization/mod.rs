//! Process-wide setup.
//!
//! - Logger (`env_logger` with plain or JSON output)
//! - DNS resolver (hickory, system configuration with a public fallback)
//!
//! All initialization functions return `InitializationError` on failure.

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;
