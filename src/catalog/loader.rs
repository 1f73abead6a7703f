//! CSV loading for the course table.

use super::CourseRecord;
use crate::error::{KursError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument};

/// A raw catalog row as exported from the course table.
#[derive(Debug, Deserialize)]
struct CourseRow {
    #[serde(rename = "Course Title")]
    title: String,
    #[serde(rename = "About Course")]
    about: String,
    #[serde(rename = "Who This Course Is For")]
    audience: String,
    #[serde(rename = "Course Released Languages")]
    languages: String,
}

impl From<CourseRow> for CourseRecord {
    fn from(row: CourseRow) -> Self {
        CourseRecord::new(&row.title, &row.about, &row.audience, &row.languages)
    }
}

/// Load every course from a CSV file.
///
/// A missing file or a malformed table is reported as
/// [`KursError::DataUnavailable`].
#[instrument]
pub fn load_courses(path: &Path) -> Result<Vec<CourseRecord>> {
    if !path.exists() {
        return Err(KursError::DataUnavailable(format!(
            "{} not found",
            path.display()
        )));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| KursError::DataUnavailable(format!("{}: {}", path.display(), e)))?;

    parse_courses(file)
}

/// Parse courses from any CSV reader. Extra columns are ignored.
pub fn parse_courses<R: Read>(reader: R) -> Result<Vec<CourseRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, row) in csv_reader.deserialize::<CourseRow>().enumerate() {
        let row = row.map_err(|e| {
            KursError::DataUnavailable(format!("malformed course row {}: {}", line + 1, e))
        })?;
        records.push(CourseRecord::from(row));
    }

    debug!("Parsed {} course records", records.len());
    Ok(records)
}
