//! Rate-schedule configuration for the rostering engine.
//!
//! Configuration is loaded from a directory of YAML files describing the
//! funding scheme: metadata, funding categories, and effective-dated hourly
//! rates keyed by shift type and staffing ratio.

mod loader;
mod types;

pub use loader::SchemeLoader;
pub use types::{CategoryInfo, RateFile, SchemeConfig, SchemeMetadata};
