use crate::core::pipeline::default_file_name;
use crate::core::records::{default_models, DEFAULT_DUAL_SIM_PROBABILITY};
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{GenError, Result};
use crate::utils::prompt::DEFAULT_ROW_COUNT;
use crate::utils::validation::{
    validate_file_name, validate_non_empty_list, validate_path, validate_range, Validate,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub rows: Option<usize>,
    pub dual_sim_probability: Option<f64>,
    pub seed: Option<u64>,
    pub models: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub file_name: Option<String>,
    pub format: Option<OutputFormat>,
    pub bom: Option<bool>,
}

impl TomlConfig {
    /// Reads and parses a profile from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a profile after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Row count from the profile, if it pins one.
    pub fn rows(&self) -> Option<usize> {
        self.generator.rows
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.generator.rows = Some(rows);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.generator.seed = Some(seed);
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("output.path", &self.output.path)?;
        validate_file_name("output.file_name", &self.file_name())?;

        if let Some(probability) = self.generator.dual_sim_probability {
            validate_range("generator.dual_sim_probability", probability, 0.0, 1.0)?;
        }

        if let Some(models) = &self.generator.models {
            validate_non_empty_list("generator.models", models)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn file_name(&self) -> String {
        self.output
            .file_name
            .clone()
            .unwrap_or_else(|| default_file_name(self.output_format()))
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    fn write_bom(&self) -> bool {
        self.output.bom.unwrap_or(true)
    }

    fn row_count(&self) -> usize {
        self.generator.rows.unwrap_or(DEFAULT_ROW_COUNT)
    }

    fn models(&self) -> Vec<String> {
        self.generator.models.clone().unwrap_or_else(default_models)
    }

    fn dual_sim_probability(&self) -> f64 {
        self.generator
            .dual_sim_probability
            .unwrap_or(DEFAULT_DUAL_SIM_PROBABILITY)
    }

    fn seed(&self) -> Option<u64> {
        self.generator.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
