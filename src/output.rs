//! Semicolon-delimited output table.
//!
//! Fields are written verbatim: no quoting or escaping, so a `;` inside a
//! field shifts the columns of that row. Extracted fields never contain a
//! newline (addresses carry `<br>` markers, descriptions are joined).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use crate::record::{Record, HEADER};

pub const DELIMITER: u8 = b';';

/// Write the header and one row per record.
pub fn serialize<W: Write>(writer: W, records: &[Record]) -> csv::Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table next to `path` and move it into place.
pub fn write_table(path: &Path, records: &[Record]) -> Result<()> {
    let tmp = tmp_path(path);
    let file = fs::File::create(&tmp).with_context(|| format!("Failed to create {}", tmp.display()))?;
    if let Err(e) = serialize(file, records) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to write {}", tmp.display()));
    }
    fs::rename(&tmp, path).with_context(|| format!("Failed to move output into {}", path.display()))?;
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
