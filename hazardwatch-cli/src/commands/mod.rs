//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`assess`] - Full hazard assessment with action plan
//! - [`config`] - Configuration management (init, path, show)
//! - [`quakes`] - Recent earthquake listing

pub mod assess;
pub mod config;
pub mod quakes;
