use log::{debug, warn};
use serde::Serialize;

use crate::config::{ProbeCheck, TableContract};
use crate::data::model::{CellValue, Column, ProbeReference, Table};
use crate::error::{InvalidCall, ValidationError};

/// Probe ids quoted in an [`ValidationError::UnknownProbes`] message.
const UNKNOWN_PROBE_EXAMPLES: usize = 5;

/// Outcome of a successful table validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub rows: usize,
    /// Probe ids absent from the reference; `None` when not checked.
    pub unknown_probes: Option<usize>,
}

// ---------------------------------------------------------------------------
// TableSchemaValidator
// ---------------------------------------------------------------------------

/// Checks a loaded bed table against the column and value contract.
#[derive(Debug, Clone, Default)]
pub struct TableSchemaValidator {
    contract: TableContract,
}

impl TableSchemaValidator {
    pub fn new(contract: TableContract) -> Self {
        Self { contract }
    }

    /// Validate `table`; `probes` is only consulted when the contract's
    /// [`ProbeCheck`] asks for it.
    pub fn validate(
        &self,
        table: &Table,
        probes: &ProbeReference,
    ) -> Result<TableReport, ValidationError> {
        for column in &self.contract.required_columns {
            self.require(table, column)?;
        }

        let calls = self.require(table, &self.contract.call_column)?;
        let violations = invalid_calls(table, calls);
        if !violations.is_empty() {
            return Err(ValidationError::InvalidMethylationValue {
                column: calls.name.clone(),
                violations,
            });
        }

        let unknown_probes = match self.contract.probe_check {
            ProbeCheck::Ignore => None,
            check => Some(self.cross_check(table, probes, check)?),
        };

        debug!("bed table passed validation ({} rows)", table.len());
        Ok(TableReport {
            rows: table.len(),
            unknown_probes,
        })
    }

    fn require<'t>(&self, table: &'t Table, name: &str) -> Result<&'t Column, ValidationError> {
        table.column(name).ok_or_else(|| ValidationError::MissingColumn {
            column: name.to_string(),
        })
    }

    fn cross_check(
        &self,
        table: &Table,
        probes: &ProbeReference,
        check: ProbeCheck,
    ) -> Result<usize, ValidationError> {
        let column = self.require(table, &self.contract.probe_column)?;
        let unknown: Vec<String> = column
            .raw
            .iter()
            .filter(|id| !probes.contains(id))
            .cloned()
            .collect();

        if unknown.is_empty() {
            return Ok(0);
        }
        let examples: Vec<String> = unknown.iter().take(UNKNOWN_PROBE_EXAMPLES).cloned().collect();
        match check {
            ProbeCheck::Enforce => Err(ValidationError::UnknownProbes {
                count: unknown.len(),
                examples,
            }),
            _ => {
                warn!(
                    "{} of {} probe ids are not in the model's probe reference (e.g. {})",
                    unknown.len(),
                    table.len(),
                    examples.join(", ")
                );
                Ok(unknown.len())
            }
        }
    }
}

/// Every row whose call is not exactly 0 or 1, in row order.
fn invalid_calls(table: &Table, calls: &Column) -> Vec<InvalidCall> {
    calls
        .values
        .iter()
        .enumerate()
        .filter(|(_, value)| !is_valid_call(value))
        .map(|(row, value)| InvalidCall {
            line: table.line_number(row).unwrap_or(row + 2),
            value: value.clone(),
        })
        .collect()
}

fn is_valid_call(value: &CellValue) -> bool {
    matches!(value.as_f64(), Some(v) if v == 0.0 || v == 1.0)
}
