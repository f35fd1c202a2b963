use crate::domain::model::{DeviceRecord, OutputFormat, RenderedOutput};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    /// File name inside `output_path`, defaulting to one matching the format.
    fn file_name(&self) -> String;
    fn output_format(&self) -> OutputFormat;
    fn write_bom(&self) -> bool;
    fn row_count(&self) -> usize;
    fn models(&self) -> Vec<String>;
    fn dual_sim_probability(&self) -> f64;
    fn seed(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn generate(&self) -> Result<Vec<DeviceRecord>>;
    async fn render(&self, records: Vec<DeviceRecord>) -> Result<RenderedOutput>;
    async fn load(&self, output: RenderedOutput) -> Result<String>;
}
