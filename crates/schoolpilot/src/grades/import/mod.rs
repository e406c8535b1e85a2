//! CSV gradebook import.
//!
//! Expects `Category,Name,Score,Max` headers. Categories are matched to the course's own
//! names ignoring case and spacing; unmatched labels pass through unchanged and are then
//! treated as orphans by the engine.

mod normalizer;
mod parser;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::domain::{Category, GradeEntry};
use normalizer::category_key;
use parser::RowError;

#[derive(Debug, thiserror::Error)]
pub enum GradebookImportError {
    #[error("failed to read gradebook export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid gradebook CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("gradebook row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

impl From<RowError> for GradebookImportError {
    fn from(err: RowError) -> Self {
        match err {
            RowError::Csv(err) => Self::Csv(err),
            RowError::Invalid { row, reason } => Self::InvalidRow { row, reason },
        }
    }
}

pub struct GradebookImporter;

impl GradebookImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        categories: &[Category],
    ) -> Result<Vec<GradeEntry>, GradebookImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, categories)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        categories: &[Category],
    ) -> Result<Vec<GradeEntry>, GradebookImportError> {
        let canonical: HashMap<String, &str> = categories
            .iter()
            .map(|category| (category_key(&category.name), category.name.as_str()))
            .collect();

        let records = parser::parse_records(reader)?;
        let mut entries = Vec::with_capacity(records.len());

        for record in records {
            let category = match canonical.get(&category_key(&record.category)) {
                Some(name) => (*name).to_string(),
                None => {
                    tracing::debug!(
                        row = record.row,
                        category = %record.category,
                        "gradebook row references unknown category"
                    );
                    record.category
                }
            };

            entries.push(GradeEntry {
                category,
                name: record.name,
                score: record.score,
                max: record.max,
            });
        }

        Ok(entries)
    }
}
