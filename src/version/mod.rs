//! Version reconciliation layer
//!
//! This module turns raw version strings from `composer.lock` and Packagist
//! into comparable versions and decides which locked packages are outdated.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Checker   │────▶│  Platform   │
//! │  (fetch)    │     │ (reconcile) │     │  (min/max)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Registries  │     │   Semver    │
//! │ (packagist) │     │(normalize)  │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: Per-package reconciliation and outdated decision
//! - [`platform`]: Running min/max over PHP requirements
//! - [`registry`]: Registry trait for fetching versions from remote sources
//! - [`registries`]: Concrete registry implementations (Packagist)
//! - [`error`]: Error types for registry operations
//! - [`semver`]: Version normalization and comparison
//! - [`types`]: Common types like `RegistryVersionSet` and `UpdateFinding`

pub mod checker;
pub mod error;
pub mod platform;
pub mod registries;
pub mod registry;
pub mod semver;
pub mod types;
