use crate::domain::luhn::{self, IMEI_LEN, PAYLOAD_LEN};
use crate::utils::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 15-digit identifier whose last digit is the Luhn check digit of the first 14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Imei([u8; IMEI_LEN]);

impl Imei {
    /// Completes a payload with its check digit. Digit values above 9 are a caller bug.
    pub fn from_payload(payload: [u8; PAYLOAD_LEN]) -> Self {
        debug_assert!(payload.iter().all(|d| *d <= 9));
        let mut digits = [0u8; IMEI_LEN];
        digits[..PAYLOAD_LEN].copy_from_slice(&payload);
        digits[PAYLOAD_LEN] = luhn::check_digit_of(&payload);
        Self(digits)
    }

    pub fn digits(&self) -> &[u8; IMEI_LEN] {
        &self.0
    }

    pub fn payload(&self) -> &[u8] {
        &self.0[..PAYLOAD_LEN]
    }

    pub fn check_digit(&self) -> u8 {
        self.0[PAYLOAD_LEN]
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

impl FromStr for Imei {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = luhn::parse_digits::<IMEI_LEN>(s)?;
        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&digits[..PAYLOAD_LEN]);

        let imei = Self::from_payload(payload);
        if imei.check_digit() != digits[PAYLOAD_LEN] {
            return Err(GenError::invalid_input(format!(
                "'{}' has check digit {}, expected {}",
                s,
                digits[PAYLOAD_LEN],
                imei.check_digit()
            )));
        }
        Ok(imei)
    }
}

impl TryFrom<String> for Imei {
    type Error = GenError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Imei> for String {
    fn from(imei: Imei) -> Self {
        imei.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub model: String,
    pub imei1: Imei,
    pub imei2: Option<Imei>,
}

impl DeviceRecord {
    /// Row cells in header order; a missing second IMEI becomes an empty cell.
    pub fn to_row(&self) -> [String; 3] {
        [
            self.model.clone(),
            self.imei1.to_string(),
            self.imei2.map(|imei| imei.to_string()).unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    /// Field delimiter for the text formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Json => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub records: Vec<DeviceRecord>,
    pub format: OutputFormat,
    pub content: Vec<u8>,
}
