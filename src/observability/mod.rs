//! Structured logging setup.
//!
//! Every controller logs through `tracing` macros; nothing is emitted until a
//! subscriber is installed. Hosts that already install their own subscriber
//! can skip this module entirely.
//!
//! # Configuration
//!
//! The filter is resolved from:
//! 1. `trace_level` in [`crate::Config`]
//! 2. Default: `"info"`
//!
//! Directives use `EnvFilter` syntax, so `"directory_page::controllers=trace"`
//! narrows output to one layer.
//!
//! # Usage
//!
//! ```rust
//! use directory_page::observability::init_tracing;
//! use directory_page::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("page script loaded");
//! ```

mod init;

pub use init::init_tracing;
