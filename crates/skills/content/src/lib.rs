//! Data-driven configuration for the skill engine.
//!
//! This crate reads the engine's tunables from TOML files. Values outside
//! their documented ranges are clamped on load so the engine only ever sees
//! valid configuration.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigFile, ConfigLoader};
