//! Luhn check digit arithmetic for 15-digit device identifiers.
//!
//! The payload is the first 14 digits; the check digit makes the whole
//! sequence's Luhn sum congruent to 0 mod 10. Doubling starts at the payload
//! digit nearest the check digit.

use crate::utils::error::{GenError, Result};

pub const PAYLOAD_LEN: usize = 14;
pub const IMEI_LEN: usize = PAYLOAD_LEN + 1;

/// Check digit for a payload of digit values (each 0..=9).
pub fn check_digit_of(payload: &[u8; PAYLOAD_LEN]) -> u8 {
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &digit)| {
            let digit = u32::from(digit);
            if position % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Check digit for a 14-character payload string.
///
/// Fails with [`GenError::InvalidInput`] unless `payload` is exactly 14 ASCII digits.
pub fn check_digit(payload: &str) -> Result<u8> {
    let digits = parse_digits::<PAYLOAD_LEN>(payload)?;
    Ok(check_digit_of(&digits))
}

/// Whether `candidate` is 15 ASCII digits ending in the correct check digit.
pub fn is_valid(candidate: &str) -> bool {
    match parse_digits::<IMEI_LEN>(candidate) {
        Ok(digits) => {
            let mut payload = [0u8; PAYLOAD_LEN];
            payload.copy_from_slice(&digits[..PAYLOAD_LEN]);
            check_digit_of(&payload) == digits[PAYLOAD_LEN]
        }
        Err(_) => false,
    }
}

pub(crate) fn parse_digits<const N: usize>(input: &str) -> Result<[u8; N]> {
    let bytes = input.as_bytes();
    if bytes.len() != N {
        return Err(GenError::invalid_input(format!(
            "expected {} digits, got {} characters in '{}'",
            N,
            input.chars().count(),
            input
        )));
    }

    let mut digits = [0u8; N];
    for (slot, &byte) in digits.iter_mut().zip(bytes) {
        if !byte.is_ascii_digit() {
            return Err(GenError::invalid_input(format!(
                "'{}' contains a non-digit character",
                input
            )));
        }
        *slot = byte - b'0';
    }
    Ok(digits)
}
