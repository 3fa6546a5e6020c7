use std::path::Path;

use log::info;
use serde::Serialize;

use crate::archive::{ArchiveIntegrityChecker, ArchiveReport};
use crate::config::ValidationConfig;
use crate::data::loader::{load_bed, read_probe_reference};
use crate::data::model::ProbeReference;
use crate::error::ValidationError;
use crate::validate::{TableReport, TableSchemaValidator};

// ---------------------------------------------------------------------------
// Composed checks, as run before inference
// ---------------------------------------------------------------------------

/// Everything that passed.  Sections that did not run are omitted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<ArchiveReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableReport>,
}

/// Check a model archive on its own.
pub fn check_model(
    archive: &Path,
    config: &ValidationConfig,
) -> Result<CheckReport, ValidationError> {
    let checker = ArchiveIntegrityChecker::new(config.members.clone());
    Ok(CheckReport {
        archive: Some(checker.check(archive)?),
        table: None,
    })
}

/// Load and validate a bed file.
///
/// With `model`, the archive is checked first and its `probes.csv` becomes
/// the probe reference; without it the reference is empty.
pub fn check_sample(
    bed: &Path,
    model: Option<&Path>,
    config: &ValidationConfig,
) -> Result<CheckReport, ValidationError> {
    let mut report = CheckReport::default();

    let probes = match model {
        Some(archive) => {
            report = check_model(archive, config)?;
            read_probe_reference(archive)?
        }
        None => ProbeReference::default(),
    };
    info!("probe reference holds {} ids", probes.len());

    let table = load_bed(bed)?;
    let validator = TableSchemaValidator::new(config.table.clone());
    report.table = Some(validator.validate(&table, &probes)?);
    Ok(report)
}
