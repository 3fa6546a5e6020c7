//! Input checks for a methylation classifier.
//!
//! * [`archive`] – model archive member checks (mandatory vs. advisory).
//! * [`data`] – bed table and probe reference loading.
//! * [`validate`] – bed table column and value contract.
//! * [`config`] – the contracts as data, optionally read from JSON.
//! * [`pipeline`] – archive and bed checks composed the way the CLI runs them.

pub mod archive;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod validate;

pub use archive::{Advisory, ArchiveIntegrityChecker, ArchiveReport};
pub use config::{ProbeCheck, ValidationConfig};
pub use data::loader::{load_bed, parse_table, read_probe_reference};
pub use data::model::{CellValue, ProbeReference, Table};
pub use error::ValidationError;
pub use validate::{TableReport, TableSchemaValidator};
