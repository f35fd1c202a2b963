use crate::core::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub rows: usize,
    pub dual_sim_rows: usize,
}

pub struct GenerationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GenerationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting device generation");

        let records = self.pipeline.generate().await?;
        let rows = records.len();
        let dual_sim_rows = records.iter().filter(|r| r.imei2.is_some()).count();
        tracing::info!("Generated {} records ({} with a second IMEI)", rows, dual_sim_rows);

        let rendered = self.pipeline.render(records).await?;
        tracing::info!("Rendered {} bytes as {}", rendered.content.len(), rendered.format);

        let output_path = self.pipeline.load(rendered).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            rows,
            dual_sim_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeviceRecord, OutputFormat, RenderedOutput};
    use crate::utils::error::GenError;
    use std::sync::Mutex;

    struct FixedPipeline {
        records: Vec<DeviceRecord>,
        loaded: Mutex<Option<Vec<u8>>>,
        fail_load: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for FixedPipeline {
        async fn generate(&self) -> Result<Vec<DeviceRecord>> {
            Ok(self.records.clone())
        }

        async fn render(&self, records: Vec<DeviceRecord>) -> Result<RenderedOutput> {
            Ok(RenderedOutput {
                content: format!("{} rows", records.len()).into_bytes(),
                records,
                format: OutputFormat::Csv,
            })
        }

        async fn load(&self, output: RenderedOutput) -> Result<String> {
            if self.fail_load {
                return Err(GenError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            *self.loaded.lock().unwrap() = Some(output.content);
            Ok("out/devices_import.csv".to_string())
        }
    }

    fn record(imei2: Option<&str>) -> DeviceRecord {
        DeviceRecord {
            model: "Pixel 8a".to_string(),
            imei1: "490154203237518".parse().unwrap(),
            imei2: imei2.map(|s| s.parse().unwrap()),
        }
    }

    #[test]
    fn test_run_reports_summary() {
        let pipeline = FixedPipeline {
            records: vec![record(None), record(Some("000000000000000")), record(None)],
            loaded: Mutex::new(None),
            fail_load: false,
        };
        let engine = GenerationEngine::new(pipeline);

        let summary = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                output_path: "out/devices_import.csv".to_string(),
                rows: 3,
                dual_sim_rows: 1,
            }
        );
        let loaded = engine.pipeline.loaded.lock().unwrap().clone();
        assert_eq!(loaded.as_deref(), Some(&b"3 rows"[..]));
    }

    #[tokio::test]
    async fn test_run_propagates_load_failure() {
        let engine = GenerationEngine::new(FixedPipeline {
            records: vec![record(None)],
            loaded: Mutex::new(None),
            fail_load: true,
        });

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, GenError::IoError(_)));
    }
}
