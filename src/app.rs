//! Command-line flow: resolve settings and the row count, then run the engine.

use crate::config::{CliConfig, LocalStorage, TomlConfig};
use crate::core::engine::{GenerationEngine, RunSummary};
use crate::core::pipeline::DevicePipeline;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::prompt::prompt_row_count;
use crate::utils::validation::Validate;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};

/// Runs one generation. The row count is read from `input` only when neither
/// `--count` nor the profile provides it; nothing is written if that fails.
pub async fn run<R: BufRead, W: Write>(
    args: CliConfig,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<RunSummary> {
    match args.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading profile from: {}", path);
            let mut config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load profile '{}'", path))?;
            config.validate()?;

            // --count and --seed take precedence over the profile
            if let Some(seed) = args.seed {
                config.set_seed(seed);
            }
            match (args.count, config.rows()) {
                (Some(count), _) => config.set_rows(count),
                (None, Some(_)) => {}
                (None, None) => config.set_rows(prompt_row_count(input, output)?),
            }

            Ok(execute(config, output).await?)
        }
        None => {
            let mut config = args;
            config.validate()?;
            if config.count.is_none() {
                config.count = Some(prompt_row_count(input, output)?);
            }

            Ok(execute(config, output).await?)
        }
    }
}

pub async fn execute<C: ConfigProvider + 'static, W: Write>(
    config: C,
    output: &mut W,
) -> Result<RunSummary> {
    let rng = match config.seed() {
        Some(seed) => {
            tracing::debug!("Using seeded random source ({})", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    writeln!(
        output,
        "Generating {} devices into {}...",
        config.row_count(),
        config.file_name()
    )?;

    let storage = LocalStorage::new(config.output_path());
    let engine = GenerationEngine::new(DevicePipeline::new(storage, config, rng));
    engine.run().await
}
