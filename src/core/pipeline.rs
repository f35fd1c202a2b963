use crate::core::records::RecordGenerator;
use crate::core::{
    ConfigProvider, DeviceRecord, OutputFormat, Pipeline, RenderedOutput, Storage,
};
use crate::utils::error::{GenError, Result};
use rand::Rng;
use std::path::Path;
use std::sync::Mutex;

pub const HEADERS: [&str; 3] = ["דגם", "IMEI1", "IMEI2"];

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const DEFAULT_FILE_STEM: &str = "devices_import";

/// `devices_import.<ext>` for the given format.
pub fn default_file_name(format: OutputFormat) -> String {
    format!("{}.{}", DEFAULT_FILE_STEM, format.extension())
}

/// Encodes records as delimited text with a header row, optionally BOM-prefixed.
pub fn render_delimited(records: &[DeviceRecord], delimiter: u8, bom: bool) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if bom {
        buffer.extend_from_slice(UTF8_BOM);
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(buffer);

    writer.write_record(HEADERS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    writer.into_inner().map_err(|e| GenError::IoError(e.into_error()))
}

pub fn render_json(records: &[DeviceRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

pub struct DevicePipeline<S: Storage, C: ConfigProvider, R: Rng + Send> {
    storage: S,
    config: C,
    rng: Mutex<R>,
}

impl<S: Storage, C: ConfigProvider, R: Rng + Send> DevicePipeline<S, C, R> {
    pub fn new(storage: S, config: C, rng: R) -> Self {
        Self {
            storage,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: Rng + Send> Pipeline for DevicePipeline<S, C, R> {
    async fn generate(&self) -> Result<Vec<DeviceRecord>> {
        let generator =
            RecordGenerator::new(self.config.models(), self.config.dual_sim_probability())?;
        let count = self.config.row_count();

        tracing::debug!(
            "Generating {} records from {} models (dual-SIM probability {})",
            count,
            generator.models().len(),
            generator.dual_sim_probability()
        );

        let mut rng = self.rng.lock().map_err(|_| GenError::ProcessingError {
            message: "random source lock poisoned".to_string(),
        })?;
        generator.generate_batch(count, &mut *rng)
    }

    async fn render(&self, records: Vec<DeviceRecord>) -> Result<RenderedOutput> {
        let format = self.config.output_format();

        let content = match format.delimiter() {
            Some(delimiter) => render_delimited(&records, delimiter, self.config.write_bom())?,
            None => render_json(&records)?,
        };

        tracing::debug!(
            "Rendered {} records as {} ({} bytes)",
            records.len(),
            format,
            content.len()
        );

        Ok(RenderedOutput {
            records,
            format,
            content,
        })
    }

    async fn load(&self, output: RenderedOutput) -> Result<String> {
        let file_name = self.config.file_name();
        let output_path = Path::new(self.config.output_path()).join(&file_name);

        tracing::debug!(
            "Writing {} bytes to storage as {}",
            output.content.len(),
            file_name
        );
        self.storage.write_file(&file_name, &output.content).await?;

        Ok(output_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::DEFAULT_MODELS;
    use crate::domain::luhn;
    use crate::domain::model::Imei;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex as AsyncMutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<AsyncMutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(AsyncMutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        rows: usize,
        format: OutputFormat,
        bom: bool,
        models: Vec<String>,
        dual_sim_probability: f64,
    }

    impl MockConfig {
        fn new(rows: usize) -> Self {
            Self {
                rows,
                format: OutputFormat::Csv,
                bom: true,
                models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
                dual_sim_probability: 0.3,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn output_path(&self) -> &str {
            "test_output"
        }

        fn file_name(&self) -> String {
            "devices.csv".to_string()
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }

        fn write_bom(&self) -> bool {
            self.bom
        }

        fn row_count(&self) -> usize {
            self.rows
        }

        fn models(&self) -> Vec<String> {
            self.models.clone()
        }

        fn dual_sim_probability(&self) -> f64 {
            self.dual_sim_probability
        }

        fn seed(&self) -> Option<u64> {
            Some(1)
        }
    }

    fn pipeline(config: MockConfig) -> DevicePipeline<MockStorage, MockConfig, StdRng> {
        DevicePipeline::new(MockStorage::new(), config, StdRng::seed_from_u64(1))
    }

    fn sample_record(imei2: Option<&str>) -> DeviceRecord {
        DeviceRecord {
            model: "Galaxy S24".to_string(),
            imei1: "490154203237518".parse().unwrap(),
            imei2: imei2.map(|s| s.parse::<Imei>().unwrap()),
        }
    }

    #[tokio::test]
    async fn test_generate_requested_row_count() {
        let pipeline = pipeline(MockConfig::new(40));

        let records = pipeline.generate().await.unwrap();

        assert_eq!(records.len(), 40);
        assert!(records
            .iter()
            .all(|r| luhn::is_valid(&r.imei1.to_string())));
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_probability() {
        let mut config = MockConfig::new(5);
        config.dual_sim_probability = 2.0;
        let pipeline = pipeline(config);

        let err = pipeline.generate().await.unwrap_err();
        assert!(matches!(err, GenError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_render_zero_rows_is_header_only() {
        let pipeline = pipeline(MockConfig::new(0));

        let output = pipeline.render(Vec::new()).await.unwrap();

        assert!(output.content.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&output.content[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, "דגם,IMEI1,IMEI2\n");
    }

    #[tokio::test]
    async fn test_render_csv_rows() {
        let mut config = MockConfig::new(2);
        config.bom = false;
        let pipeline = pipeline(config);

        let records = vec![sample_record(None), sample_record(Some("000000000000000"))];
        let output = pipeline.render(records).await.unwrap();

        let text = String::from_utf8(output.content).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "דגם,IMEI1,IMEI2");
        assert_eq!(lines[1], "Galaxy S24,490154203237518,");
        assert_eq!(lines[2], "Galaxy S24,490154203237518,000000000000000");
    }

    #[tokio::test]
    async fn test_render_tsv_rows() {
        let mut config = MockConfig::new(1);
        config.format = OutputFormat::Tsv;
        config.bom = false;
        let pipeline = pipeline(config);

        let output = pipeline.render(vec![sample_record(None)]).await.unwrap();

        let text = String::from_utf8(output.content).unwrap();
        assert_eq!(text, "דגם\tIMEI1\tIMEI2\nGalaxy S24\t490154203237518\t\n");
    }

    #[tokio::test]
    async fn test_render_quotes_models_containing_delimiter() {
        let mut config = MockConfig::new(1);
        config.bom = false;
        let pipeline = pipeline(config);

        let mut record = sample_record(None);
        record.model = "Fold, 5G".to_string();
        let output = pipeline.render(vec![record]).await.unwrap();

        let text = String::from_utf8(output.content).unwrap();
        assert!(text.contains("\"Fold, 5G\",490154203237518,"));
    }

    #[tokio::test]
    async fn test_render_json_has_no_bom() {
        let mut config = MockConfig::new(1);
        config.format = OutputFormat::Json;
        let pipeline = pipeline(config);

        let output = pipeline.render(vec![sample_record(None)]).await.unwrap();

        assert_eq!(output.format, OutputFormat::Json);
        let parsed: Vec<DeviceRecord> = serde_json::from_slice(&output.content).unwrap();
        assert_eq!(parsed, vec![sample_record(None)]);
    }

    #[tokio::test]
    async fn test_load_writes_file_to_storage() {
        let storage = MockStorage::new();
        let pipeline = DevicePipeline::new(
            storage.clone(),
            MockConfig::new(3),
            StdRng::seed_from_u64(9),
        );

        let records = pipeline.generate().await.unwrap();
        let output = pipeline.render(records).await.unwrap();
        let expected = output.content.clone();
        let path = pipeline.load(output).await.unwrap();

        assert_eq!(path, Path::new("test_output").join("devices.csv").display().to_string());
        assert_eq!(storage.get_file("devices.csv").await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_render_json_zero_rows_is_empty_array() {
        let mut config = MockConfig::new(0);
        config.format = OutputFormat::Json;
        let pipeline = pipeline(config);

        let output = pipeline.render(Vec::new()).await.unwrap();

        assert_eq!(output.content, b"[]");
    }

    #[test]
    fn test_default_file_name_follows_format() {
        assert_eq!(default_file_name(OutputFormat::Csv), "devices_import.csv");
        assert_eq!(default_file_name(OutputFormat::Tsv), "devices_import.tsv");
        assert_eq!(default_file_name(OutputFormat::Json), "devices_import.json");
    }
}
