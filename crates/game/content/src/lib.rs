//! Data-driven battle content and its loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Card, enemy, behavior and monster skill rows (RON)
//! - Battle configuration (TOML)
//!
//! A small sample data set lives in `data/` and is reachable through
//! [`ContentFactory::bundled`].
//!
//! All loaders use battle-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, TablesFile, TablesLoader};
