// ============================================================
// Layer 4 - CSV Posting Loader
// ============================================================
// Reads the labelled training CSV with the `csv` crate.
//
// Expected header (any column order):
//   label,age_days,applicants,has_salary,salary_range,text_length,
//   red_flag_count,is_staffing,is_repost,entry_high_exp,for_client,
//   has_benefits,has_manager,competitive_salary
//
// Each row is deserialised straight into a PostingRecord by
// header name via serde. A malformed row aborts the load with
// the row number in the error.
//
// Reference: csv crate documentation (Serde deserialisation)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::posting::PostingRecord;
use crate::domain::traits::PostingSource;

/// Loads labelled postings from a single CSV file.
pub struct CsvPostingLoader {
    path: PathBuf,
}

impl CsvPostingLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl PostingSource for CsvPostingLoader {
    fn load_all(&self) -> Result<Vec<PostingRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open '{}'", self.path.display()))?;

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<PostingRecord>().enumerate() {
            // +2: one for the header line, one for 1-based numbering
            let record = row.with_context(|| {
                format!("Malformed row {} in '{}'", i + 2, self.path.display())
            })?;
            records.push(record);
        }

        tracing::debug!("Read {} rows from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}
