use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A typed cell.  Every cell of a column shares the column's inferred type.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(_) => None,
        }
    }
}

/// Inferred type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

/// One named column and its cells in row order.
///
/// `raw` keeps each cell exactly as written, since typing can rewrite an
/// identifier (`007` loads as the integer 7).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<CellValue>,
    pub raw: Vec<String>,
}

/// A loaded bed table.
///
/// `line_numbers[i]` is the 1-based line of the source file that row `i`
/// came from, so diagnostics can point back into the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    line_numbers: Vec<usize>,
}

impl Table {
    pub(crate) fn new(columns: Vec<Column>, line_numbers: Vec<usize>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == line_numbers.len()));
        Table {
            columns,
            line_numbers,
        }
    }

    /// Column names in header order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Source line of row `row`.
    pub fn line_number(&self, row: usize) -> Option<usize> {
        self.line_numbers.get(row).copied()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.line_numbers.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.line_numbers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ProbeReference – the model's universe of probe ids
// ---------------------------------------------------------------------------

/// Read-only lookup set of probe identifiers known to a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReference {
    ids: BTreeSet<String>,
}

impl ProbeReference {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProbeReference {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, probe_id: &str) -> bool {
        self.ids.contains(probe_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
