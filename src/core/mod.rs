//! Core domain models for the deploy pipeline
//!
//! This module defines the fundamental data structures that represent
//! the deploy plan, its steps, and the per-run outcome.

pub mod config;
pub mod pipeline;
pub mod state;
pub mod step;

pub use config::DeployConfig;
pub use pipeline::*;
pub use state::*;
pub use step::*;
