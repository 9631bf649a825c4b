use std::fs;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::{debug, info};

use crate::files::errors::ReadError;

/// Text encodings a sales file may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1252,
    Latin1
}

/// Tried in order; the first encoding that decodes without error wins.
///
/// Windows-1252 comes before Latin-1, so bytes `0x80..=0x9F` decode as curly quotes
/// and dashes instead of C1 control characters. Windows-1252 maps every byte, so
/// Latin-1 is only reached by custom preference lists.
pub const ENCODING_PREFERENCE: [SourceEncoding; 3] = [
    SourceEncoding::Utf8,
    SourceEncoding::Windows1252,
    SourceEncoding::Latin1
];

impl SourceEncoding {
    /// Decodes strictly: malformed input yields `None` rather than replacement characters.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            SourceEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            SourceEncoding::Windows1252 => WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
            SourceEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned())
        }
    }
}

pub fn decode_with_fallback(bytes: &[u8], encodings: &[SourceEncoding]) -> Option<(SourceEncoding, String)> {
    encodings.iter().find_map(|encoding| {
        let text = encoding.decode(bytes);

        if text.is_none() {
            debug!("Input is not valid {encoding:?}");
        }

        text.map(|text| (*encoding, text))
    })
}

/// Reads a sales file into trimmed, non-empty data lines with the header dropped.
///
/// # Errors
/// Returns `ReadError` if:
/// - The file cannot be read.
/// - No encoding in [`ENCODING_PREFERENCE`] decodes it.
/// - The file has no lines at all.
pub fn read_sales_data(path: &Path) -> Result<Vec<String>, ReadError> {
    let display_path = path.display().to_string();

    let bytes = fs::read(path).map_err(|source| ReadError::Io { path: display_path.clone(), source })?;

    let (encoding, text) = decode_with_fallback(&bytes, &ENCODING_PREFERENCE)
        .ok_or_else(|| ReadError::Undecodable { path: display_path.clone() })?;

    let mut lines = text.lines();

    if lines.next().is_none() {
        return Err(ReadError::Empty { path: display_path })
    }

    let data_lines: Vec<String> = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!("Read {} data lines from [{display_path}] as {encoding:?}", data_lines.len());

    Ok(data_lines)
}
