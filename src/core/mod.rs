pub mod engine;
pub mod imei;
pub mod pipeline;
pub mod records;

pub use crate::domain::model::{DeviceRecord, Imei, OutputFormat, RenderedOutput};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
