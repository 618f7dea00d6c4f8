//! Shared test helpers

#![allow(dead_code, unused_imports)]

pub mod project;
pub mod registry;

pub use project::write_project;
pub use registry::MockRegistry;
