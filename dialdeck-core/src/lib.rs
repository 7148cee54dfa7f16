//! # dialdeck-core
//!
//! Core library for dialdeck - a sales-development activity dashboard.
//!
//! This library provides:
//! - Domain types for activity events, daily snapshots, meetings and campaigns
//! - The analytics engine (aggregation, deltas, funnel, pacing, leaderboard)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! The engine is a pure function of its inputs: the caller fetches event,
//! snapshot and meeting rows from whatever store it uses, hands them to the
//! analytics entry points, and persists whatever the meeting commands return.
//! Nothing here talks to a database or the network.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dialdeck_core::{Config, analytics};
//!
//! let config = Config::load().expect("failed to load config");
//! let rows = analytics::build_leaderboard_limited(&[], config.analytics.leaderboard_size);
//! assert!(rows.is_empty());
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod calendar;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod meetings;
pub mod types;
