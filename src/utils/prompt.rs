use crate::utils::error::{GenError, Result};
use std::io::{BufRead, Write};

pub const DEFAULT_ROW_COUNT: usize = 50;

pub const ROW_COUNT_PROMPT: &str = "How many devices to generate? (default 50): ";

/// Parses a row count answer. Blank input selects [`DEFAULT_ROW_COUNT`].
pub fn parse_row_count(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_ROW_COUNT);
    }

    trimmed
        .parse::<usize>()
        .map_err(|_| GenError::invalid_input(format!("'{}' is not a valid row count", trimmed)))
}

/// Writes the prompt, reads one line and parses it.
pub fn prompt_row_count<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<usize> {
    write!(writer, "{}", ROW_COUNT_PROMPT)?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    parse_row_count(&line)
}
