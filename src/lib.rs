pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    advice::GeminiAdviceClient, location::FixedLocationProvider, registry::BRANCHES,
    session::LocatorSession,
};
pub use crate::utils::error::{LocatorError, Result};
