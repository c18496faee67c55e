//! Program Image Loader.
//!
//! A program image is a text file holding one signed decimal word per
//! line, in address order. Leading whitespace and anything after the
//! number are ignored, so annotated listings load as-is:
//!
//! ```text
//! 8454151     lw 0 1 five
//! 25165824    halt
//! 5           five .fill 5
//! ```

use std::fs;
use std::path::Path;

use crate::common::{SimError, Word};

/// Parses the leading integer of a line.
///
/// Accepts optional whitespace, an optional sign and at least one digit.
/// Returns `None` if there is no number or it does not fit in 32 bits.
fn parse_word(line: &str) -> Option<Word> {
    let trimmed = line.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

/// Parses a whole program image.
///
/// # Errors
///
/// [`SimError::MalformedLine`] naming the address of the first line that
/// does not start with a 32-bit integer.
pub fn parse_program(text: &str) -> Result<Vec<Word>, SimError> {
    text.lines()
        .enumerate()
        .map(|(address, line)| {
            parse_word(line).ok_or_else(|| SimError::MalformedLine {
                address,
                line: line.to_string(),
            })
        })
        .collect()
}

/// Reads and parses a program image file.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read, otherwise as
/// [`parse_program`].
pub fn load_program(path: &Path) -> Result<Vec<Word>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&text)
}
