//! Shared plumbing for the HDOCK compiler crates.
//!
//! Only cross-cutting concerns live here so every crate can depend on it
//! without pulling in the HTTP or spreadsheet stacks.
//!
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`APP_NAME`]: the name used for log files and default directories
//!
//! # Examples
//!
//! ```rust
//! use hdock_common::observability::LogConfig;
//!
//! let cfg = LogConfig::default();
//! assert_eq!(cfg.app_name, hdock_common::APP_NAME);
//! assert_eq!(cfg.default_filter, "info");
//! ```

pub mod observability;

/// Binary and log-file name shared by every crate in the workspace.
pub const APP_NAME: &str = "hdock-compile";
