use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Fatal validation errors
// ---------------------------------------------------------------------------

/// Every condition that must halt the pipeline.
///
/// Messages are meant to be shown to the user verbatim, so they carry the
/// archive path or the offending line numbers.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Mandatory file: {member}, not found in {}", .archive.display())]
    MissingMandatoryFile { member: String, archive: PathBuf },

    #[error("Cannot read {} as a model archive", .archive.display())]
    ArchiveUnreadable {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{column} column missing in bed file")]
    MissingColumn { column: String },

    #[error("Malformed table {origin}: {reason}")]
    MalformedTable { origin: String, reason: String },

    #[error(
        "Valid methylation values in '{column}' column are 0 or 1. \
         Found the following invalid values:\n{}",
        list_violations(.violations)
    )]
    InvalidMethylationValue {
        column: String,
        violations: Vec<InvalidCall>,
    },

    #[error("{count} probe id(s) not present in the probe reference (e.g. {})", .examples.join(", "))]
    UnknownProbes { count: usize, examples: Vec<String> },
}

/// One out-of-domain methylation call: the source line and what was there.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidCall {
    pub line: usize,
    pub value: CellValue,
}

fn list_violations(violations: &[InvalidCall]) -> String {
    violations
        .iter()
        .map(|v| format!("Line {}: {}\n", v.line, v.value))
        .collect()
}
