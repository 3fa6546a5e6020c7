use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::config::{Disposition, MemberRequirement};
use crate::error::ValidationError;

pub const MODEL_MEMBER: &str = "model.onnx";
pub const DECODING_MEMBER: &str = "decoding.json";
pub const PROBES_MEMBER: &str = "probes.csv";
pub const CALIBRATION_MEMBER: &str = "calibration.npy";
pub const COLORS_MEMBER: &str = "colors.json";

// ---------------------------------------------------------------------------
// Advisory – a missing optional member
// ---------------------------------------------------------------------------

/// Non-fatal finding: an optional member is absent and some downstream
/// capability degrades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub member: String,
    pub archive: PathBuf,
    pub consequence: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Optional file: {}, not found in {}: {}",
            self.member,
            self.archive.display(),
            self.consequence
        )
    }
}

/// Outcome of a successful archive check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    pub archive: PathBuf,
    pub members: BTreeSet<String>,
    pub advisories: Vec<Advisory>,
}

// ---------------------------------------------------------------------------
// ArchiveIntegrityChecker
// ---------------------------------------------------------------------------

/// Verifies that a model archive carries every member the classifier needs.
#[derive(Debug, Clone)]
pub struct ArchiveIntegrityChecker {
    requirements: Vec<MemberRequirement>,
}

impl Default for ArchiveIntegrityChecker {
    fn default() -> Self {
        Self::new(MemberRequirement::defaults())
    }
}

impl ArchiveIntegrityChecker {
    pub fn new(requirements: Vec<MemberRequirement>) -> Self {
        Self { requirements }
    }

    /// Open the archive at `archive_path` and check its member index.
    pub fn check(&self, archive_path: &Path) -> Result<ArchiveReport, ValidationError> {
        let unreadable = |source: zip::result::ZipError| ValidationError::ArchiveUnreadable {
            archive: archive_path.to_path_buf(),
            source,
        };
        let file = File::open(archive_path).map_err(|e| unreadable(e.into()))?;
        let archive = zip::ZipArchive::new(file).map_err(unreadable)?;

        let names: BTreeSet<String> = archive.file_names().map(str::to_string).collect();
        debug!("{} members in {}", names.len(), archive_path.display());

        self.check_members(names, archive_path)
    }

    /// Classify an explicit member listing.
    ///
    /// Mandatory members are tested first, in requirement order; the first
    /// absent one is the error.  Every absent advisory member then yields
    /// exactly one [`Advisory`], which is also logged.
    pub fn check_members(
        &self,
        members: BTreeSet<String>,
        archive_path: &Path,
    ) -> Result<ArchiveReport, ValidationError> {
        if let Some(missing) = self
            .requirements
            .iter()
            .filter(|r| r.disposition == Disposition::Mandatory)
            .find(|r| !members.contains(&r.name))
        {
            return Err(ValidationError::MissingMandatoryFile {
                member: missing.name.clone(),
                archive: archive_path.to_path_buf(),
            });
        }

        let advisories: Vec<Advisory> = self
            .requirements
            .iter()
            .filter(|r| !members.contains(&r.name))
            .filter_map(|r| match &r.disposition {
                Disposition::Advisory { consequence } => Some(Advisory {
                    member: r.name.clone(),
                    archive: archive_path.to_path_buf(),
                    consequence: consequence.clone(),
                }),
                Disposition::Mandatory => None,
            })
            .collect();

        for advisory in &advisories {
            warn!("{advisory}");
        }

        Ok(ArchiveReport {
            archive: archive_path.to_path_buf(),
            members,
            advisories,
        })
    }
}
