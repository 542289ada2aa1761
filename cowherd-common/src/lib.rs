//! Common types and utilities shared across Cowherd crates.
//!
//! This crate defines shared error types, the institutional-access flag, and
//! observability helpers used throughout the Cowherd workspace. It is
//! intentionally lightweight and dependency‑minimal so that all crates can
//! depend on it without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`Access`]: Whether the operator reaches the archive from inside or
//!   outside the subscribing network
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`CowherdError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use cowherd_common::Access;
//!
//! let access = Access::OffCampus;
//! assert!(access.is_off_campus());
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Where the operator sits relative to the subscribing institution's network.
///
/// The archive redirects off-campus visitors through an authentication portal
/// before the catalog renders, so several waits and entry URLs differ between
/// the two modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    OnCampus,
    OffCampus,
}

impl Access {
    pub fn is_off_campus(&self) -> bool {
        matches!(self, Access::OffCampus)
    }
}

impl Default for Access {
    fn default() -> Self {
        Access::OnCampus
    }
}

/// Error types used across the Cowherd system.
#[derive(thiserror::Error, Debug)]
pub enum CowherdError {
    /// The catalog did not contain a node the walk depends on.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A driver (browser, network, etc.) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`CowherdError`].
pub type Result<T> = std::result::Result<T, CowherdError>;
