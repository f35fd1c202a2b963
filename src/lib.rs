#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{LocalStorage, TomlConfig};
pub use core::{engine::GenerationEngine, pipeline::DevicePipeline};
pub use domain::model::{DeviceRecord, Imei, OutputFormat};
pub use utils::error::{GenError, Result};
