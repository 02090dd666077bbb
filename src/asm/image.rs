//! Program images on disk.
//!
//! The text format is one hexadecimal word per line, with `//` and `;`
//! comments and blank lines ignored. A leading `0x` on a word is accepted.
//!
//! ```text
//! // boot: R5 := #0x2A
//! 005002AB
//! 01030050
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failure to read, write or parse a program image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("image line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Parse image text into words.
pub fn parse_image(text: &str) -> Result<Vec<u32>, ImageError> {
    let mut words = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw
            .split("//")
            .next()
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim();
        if line.is_empty() {
            continue;
        }
        let digits = line.strip_prefix("0x").unwrap_or(line);
        let word = u32::from_str_radix(digits, 16).map_err(|e| ImageError::Parse {
            line: index + 1,
            message: format!("bad word {line:?}: {e}"),
        })?;
        words.push(word);
    }
    Ok(words)
}

/// Render words as image text.
pub fn format_image(words: &[u32]) -> String {
    let mut out = String::new();
    for word in words {
        let _ = writeln!(out, "{word:08X}");
    }
    out
}

/// Load an image file.
pub fn load_image(path: &Path) -> Result<Vec<u32>, ImageError> {
    parse_image(&fs::read_to_string(path)?)
}

/// Save an image file.
pub fn save_image(path: &Path, words: &[u32]) -> Result<(), ImageError> {
    fs::write(path, format_image(words))?;
    Ok(())
}
