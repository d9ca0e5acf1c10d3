//! Configuration module for Forum-Scribe
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line flags are layered on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use forum_scribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("forum-scribe.toml")).unwrap();
//! println!("Pausing {}ms between discussions", config.run.delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ClientConfig, Config, RunConfig, SiteConfig, DEFAULT_SITE_ROOT, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};

// Re-export validation for settings layered on after loading
pub use validation::validate;
