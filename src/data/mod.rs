//! Data layer: table types and loading.
//!
//! Architecture:
//! ```text
//!  sample.bed            model.zip
//!      │                     │
//!      ▼                     ▼
//!   ┌──────────┐     ┌───────────────┐
//!   │  loader  │     │ loader (csv)  │  probes.csv → ProbeReference
//!   └──────────┘     └───────────────┘
//!      │ parse_table         │
//!      ▼                     │
//!   ┌────────┐               │
//!   │ Table  │  typed columns, source line numbers
//!   └────────┘               │
//!      │                     │
//!      ▼                     ▼
//!   ┌──────────────────────────────┐
//!   │ validate::TableSchemaValidator│
//!   └──────────────────────────────┘
//! ```

pub mod loader;
pub mod model;
