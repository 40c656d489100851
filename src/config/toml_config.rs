use crate::core::advice::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::export::DEFAULT_SUMMARY_FILENAME;
use crate::core::ConfigProvider;
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub advice: AdviceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    pub filename: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LocatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("advice.endpoint", &self.advice.endpoint)?;
        validate_non_empty_string("advice.model", &self.advice.model)?;
        if let Some(timeout) = self.advice.timeout_seconds {
            validate_positive_number("advice.timeout_seconds", timeout, 1)?;
        }
        if let Some(api_key) = &self.advice.api_key {
            if ENV_VAR.is_match(api_key) {
                return Err(LocatorError::InvalidConfigValueError {
                    field: "advice.api_key".to_string(),
                    value: api_key.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }
        validate_path("output.path", &self.output.path)?;
        if let Some(filename) = &self.output.filename {
            validate_path("output.filename", filename)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn advice_endpoint(&self) -> &str {
        &self.advice.endpoint
    }

    fn model(&self) -> &str {
        &self.advice.model
    }

    fn api_key(&self) -> Option<&str> {
        self.advice.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.advice.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn summary_filename(&self) -> &str {
        self.output
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_SUMMARY_FILENAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
