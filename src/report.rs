use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::error::PageError;
use crate::parser::PageExtraction;

#[derive(Debug, Clone, Serialize)]
pub struct SkippedPage {
    pub filename: String,
    pub reason: String,
}

/// Per-run totals: what was read, what was kept, what was skipped and why.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub pages: usize,
    pub pages_with_records: usize,
    pub skipped_pages: Vec<SkippedPage>,
    pub skipped_pages_by_reason: BTreeMap<String, usize>,
    pub fragments: usize,
    pub records: usize,
    pub skipped_fragments_by_reason: BTreeMap<String, usize>,
}

impl RunReport {
    pub fn record_page(&mut self, page: &PageExtraction) {
        self.pages += 1;
        self.fragments += page.fragments;
        self.records += page.records.len();
        if !page.records.is_empty() {
            self.pages_with_records += 1;
        }
        for skip in &page.skipped {
            *self.skipped_fragments_by_reason.entry(skip.kind()).or_default() += 1;
        }
    }

    pub fn record_skipped_page(&mut self, filename: &str, err: &PageError) {
        self.pages += 1;
        *self
            .skipped_pages_by_reason
            .entry(err.kind().to_string())
            .or_default() += 1;
        self.skipped_pages.push(SkippedPage {
            filename: filename.to_string(),
            reason: err.to_string(),
        });
    }

    pub fn skipped_fragments(&self) -> usize {
        self.skipped_fragments_by_reason.values().sum()
    }

    pub fn print(&self) {
        println!(
            "Read {} pages ({} with records, {} skipped).",
            self.pages,
            self.pages_with_records,
            self.skipped_pages.len()
        );
        println!(
            "Extracted {} records from {} company blocks ({} skipped).",
            self.records,
            self.fragments,
            self.skipped_fragments()
        );
        if !self.skipped_pages_by_reason.is_empty() {
            println!("\n--- Skipped pages ---");
            for (reason, n) in &self.skipped_pages_by_reason {
                println!("  {:<32} {:>6}", reason, n);
            }
        }
        if !self.skipped_fragments_by_reason.is_empty() {
            println!("\n--- Skipped company blocks ---");
            for (reason, n) in &self.skipped_fragments_by_reason {
                println!("  {:<32} {:>6}", reason, n);
            }
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))
    }
}
