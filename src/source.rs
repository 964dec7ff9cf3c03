use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// One saved page: its file name and raw bytes.
pub struct SourcePage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Regular, non-hidden files in `dir`, sorted by name, without `exclude`.
pub fn discover(dir: &Path, exclude: &[&Path]) -> Result<Vec<PathBuf>> {
    let excluded: Vec<PathBuf> = exclude.iter().filter_map(|p| fs::canonicalize(p).ok()).collect();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if fs::canonicalize(&path).is_ok_and(|c| excluded.contains(&c)) {
            continue;
        }
        files.push(path);
    }
    files.sort();

    info!("Found {} files in {}", files.len(), dir.display());
    Ok(files)
}

pub fn read_page(path: &Path) -> std::io::Result<SourcePage> {
    Ok(SourcePage {
        filename: file_name(path),
        bytes: fs::read(path)?,
    })
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
