use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::archive::{
    CALIBRATION_MEMBER, COLORS_MEMBER, DECODING_MEMBER, MODEL_MEMBER, PROBES_MEMBER,
};

pub const METHYLATION_CALL_COLUMN: &str = "methylation_call";
pub const PROBE_ID_COLUMN: &str = "probe_id";

// ---------------------------------------------------------------------------
// Archive member contract
// ---------------------------------------------------------------------------

/// What the absence of an archive member means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum Disposition {
    /// Absence is fatal.
    Mandatory,
    /// Absence only degrades `consequence`.
    Advisory { consequence: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRequirement {
    pub name: String,
    #[serde(flatten)]
    pub disposition: Disposition,
}

impl MemberRequirement {
    pub fn mandatory(name: &str) -> Self {
        Self {
            name: name.to_string(),
            disposition: Disposition::Mandatory,
        }
    }

    pub fn advisory(name: &str, consequence: &str) -> Self {
        Self {
            name: name.to_string(),
            disposition: Disposition::Advisory {
                consequence: consequence.to_string(),
            },
        }
    }

    /// The member set every classifier archive is checked against.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::mandatory(MODEL_MEMBER),
            Self::mandatory(DECODING_MEMBER),
            Self::mandatory(PROBES_MEMBER),
            Self::advisory(CALIBRATION_MEMBER, "score calibration will not be possible"),
            Self::advisory(COLORS_MEMBER, "default colors will be used"),
        ]
    }
}

// ---------------------------------------------------------------------------
// Bed table contract
// ---------------------------------------------------------------------------

/// How `probe_id` values are compared with the model's probe reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeCheck {
    /// The reference is accepted but not consulted.
    #[default]
    Ignore,
    /// Unknown probes are counted and logged.
    Warn,
    /// Unknown probes are a fatal error.
    Enforce,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableContract {
    /// Columns that must be present, checked in this order.
    pub required_columns: Vec<String>,
    /// Column whose values must lie in {0, 1}.
    pub call_column: String,
    pub probe_column: String,
    pub probe_check: ProbeCheck,
}

impl Default for TableContract {
    fn default() -> Self {
        Self {
            required_columns: vec![
                METHYLATION_CALL_COLUMN.to_string(),
                PROBE_ID_COLUMN.to_string(),
            ],
            call_column: METHYLATION_CALL_COLUMN.to_string(),
            probe_column: PROBE_ID_COLUMN.to_string(),
            probe_check: ProbeCheck::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationConfig – both contracts, optionally read from JSON
// ---------------------------------------------------------------------------

/// Contracts used by the checkers.  Missing fields fall back to defaults.
///
/// ```json
/// {
///   "members": [
///     { "name": "model.onnx", "disposition": "mandatory" },
///     { "name": "colors.json", "disposition": "advisory",
///       "consequence": "default colors will be used" }
///   ],
///   "table": { "probe_check": "warn" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub members: Vec<MemberRequirement>,
    pub table: TableContract,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            members: MemberRequirement::defaults(),
            table: TableContract::default(),
        }
    }
}

impl ValidationConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
