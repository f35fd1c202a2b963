use crate::core::pipeline::default_file_name;
use crate::core::records::{default_models, DEFAULT_DUAL_SIM_PROBABILITY};
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::Result;
use crate::utils::prompt::DEFAULT_ROW_COUNT;
use crate::utils::validation::{
    validate_file_name, validate_non_empty_list, validate_path, validate_range, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "device-gen")]
#[command(about = "Generate sample device import files with valid IMEIs")]
pub struct CliConfig {
    /// Number of rows; prompted for when omitted
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    #[arg(long, default_value = ".", conflicts_with = "config")]
    pub output_path: String,

    /// Defaults to devices_import.<format>
    #[arg(long, conflicts_with = "config")]
    pub file_name: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv, conflicts_with = "config")]
    pub format: OutputFormat,

    /// Chance that a row gets a second IMEI
    #[arg(long, default_value_t = DEFAULT_DUAL_SIM_PROBABILITY, conflicts_with = "config")]
    pub dual_sim_probability: f64,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated model names replacing the built-in list
    #[arg(long, value_delimiter = ',', conflicts_with = "config")]
    pub models: Vec<String>,

    /// Do not prefix text output with a UTF-8 byte-order mark
    #[arg(long, conflicts_with = "config")]
    pub no_bom: bool,

    /// TOML profile replacing the output and generator flags; --count and --seed still apply
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| default_file_name(self.format))
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn write_bom(&self) -> bool {
        !self.no_bom
    }

    fn row_count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_ROW_COUNT)
    }

    fn models(&self) -> Vec<String> {
        if self.models.is_empty() {
            default_models()
        } else {
            self.models.clone()
        }
    }

    fn dual_sim_probability(&self) -> f64 {
        self.dual_sim_probability
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        if let Some(file_name) = &self.file_name {
            validate_file_name("file_name", file_name)?;
        }
        validate_range("dual_sim_probability", self.dual_sim_probability, 0.0, 1.0)?;
        validate_non_empty_list("models", &self.models())?;
        Ok(())
    }
}
