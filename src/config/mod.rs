pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::advice::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
#[cfg(feature = "cli")]
use crate::core::export::DEFAULT_SUMMARY_FILENAME;
#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, Coordinate};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_coordinate, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "clinic-locator")]
#[command(about = "Find the nearest dental clinic branch and a travel summary for a patient")]
pub struct CliConfig {
    /// Patient location as free text (town, street, landmark)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Device latitude in decimal degrees
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Device longitude in decimal degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// TOML configuration file; replaces the advice and output flags below
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Write the advice to a plain-text file for the patient
    #[arg(long)]
    pub export: bool,

    /// Rank branches only; never call the advice service
    #[arg(long)]
    pub offline: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn device_coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lng) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn advice_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn summary_filename(&self) -> &str {
        DEFAULT_SUMMARY_FILENAME
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validate_path("output_path", &self.output_path)?;
        if let Some(coordinate) = self.device_coordinate() {
            validate_coordinate("device", &coordinate)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::try_parse_from(["clinic-locator", "--query", "Cheras"]).unwrap();
        assert_eq!(config.query.as_deref(), Some("Cheras"));
        assert_eq!(config.api_endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.device_coordinate().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let config =
            CliConfig::try_parse_from(["clinic-locator", "--lat", "-33.86", "--lng", "151.2"])
                .unwrap();
        assert_eq!(config.device_coordinate(), Some(Coordinate::new(-33.86, 151.2)));
    }

    #[test]
    fn test_lat_requires_lng() {
        assert!(CliConfig::try_parse_from(["clinic-locator", "--lat", "3.1"]).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_coordinate() {
        let config =
            CliConfig::try_parse_from(["clinic-locator", "--lat", "95", "--lng", "101"]).unwrap();
        assert!(config.validate().is_err());
    }
}
