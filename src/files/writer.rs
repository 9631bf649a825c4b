use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::files::errors::WriteError;
use crate::models::{ENRICHED_HEADERS, EnrichedTransaction};

/// Writes the enriched table: a header row then one pipe-delimited row per record.
pub fn write_enriched(path: &Path, records: &[EnrichedTransaction]) -> Result<(), WriteError> {
    let display_path = path.display().to_string();
    let file = create_file(path)?;

    let csv_error = |source| WriteError::Csv { path: display_path.clone(), source };

    let mut writer = WriterBuilder::new()
        .delimiter(b'|')
        .quote_style(QuoteStyle::Never)
        .from_writer(BufWriter::new(file));

    writer.write_record(ENRICHED_HEADERS).map_err(csv_error)?;

    for record in records {
        writer.write_record(record.to_record()).map_err(csv_error)?;
    }

    writer.flush().map_err(|source| WriteError::Io { path: display_path.clone(), source })?;

    info!("Enriched data saved to [{display_path}] ({} rows)", records.len());

    Ok(())
}

/// Writes `contents` to `path`, creating missing parent directories.
pub fn write_text(path: &Path, contents: &[u8]) -> Result<(), WriteError> {
    let display_path = path.display().to_string();
    let mut output = BufWriter::new(create_file(path)?);

    output.write_all(contents)
        .and_then(|_| output.flush())
        .map_err(|source| WriteError::Io { path: display_path, source })
}

fn create_file(path: &Path) -> Result<File, WriteError> {
    let io_error = |source| WriteError::Io { path: path.display().to_string(), source };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(io_error)?;
    }

    File::create(path).map_err(io_error)
}
