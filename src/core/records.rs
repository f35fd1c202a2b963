use crate::core::imei::generate_imei;
use crate::domain::model::DeviceRecord;
use crate::utils::error::{GenError, Result};
use crate::utils::validation::{validate_non_empty_list, validate_range};
use rand::seq::IndexedRandom;
use rand::Rng;

pub const DEFAULT_MODELS: [&str; 10] = [
    "iPhone 15 Pro",
    "iPhone 15",
    "iPhone 14",
    "Galaxy S24 Ultra",
    "Galaxy S24",
    "Galaxy A55",
    "Xiaomi 14",
    "Redmi Note 13",
    "Pixel 8 Pro",
    "Pixel 8a",
];

/// Share of dual-SIM devices that get a second IMEI.
pub const DEFAULT_DUAL_SIM_PROBABILITY: f64 = 0.3;

pub fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct RecordGenerator {
    models: Vec<String>,
    dual_sim_probability: f64,
}

impl RecordGenerator {
    pub fn new(models: Vec<String>, dual_sim_probability: f64) -> Result<Self> {
        validate_non_empty_list("models", &models)?;
        validate_range("dual_sim_probability", dual_sim_probability, 0.0, 1.0)?;

        Ok(Self {
            models,
            dual_sim_probability,
        })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn dual_sim_probability(&self) -> f64 {
        self.dual_sim_probability
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DeviceRecord> {
        let model = self
            .models
            .choose(rng)
            .cloned()
            .ok_or_else(|| GenError::ProcessingError {
                message: "model list is empty".to_string(),
            })?;

        let imei1 = generate_imei(rng);
        let imei2 = if rng.random_bool(self.dual_sim_probability) {
            Some(generate_imei(rng))
        } else {
            None
        };

        Ok(DeviceRecord {
            model,
            imei1,
            imei2,
        })
    }

    pub fn generate_batch<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<DeviceRecord>> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

impl Default for RecordGenerator {
    fn default() -> Self {
        Self {
            models: default_models(),
            dual_sim_probability: DEFAULT_DUAL_SIM_PROBABILITY,
        }
    }
}
