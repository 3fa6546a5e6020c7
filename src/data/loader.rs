use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use log::debug;

use super::model::{CellValue, Column, ColumnKind, ProbeReference, Table};
use crate::archive::PROBES_MEMBER;
use crate::config::{METHYLATION_CALL_COLUMN, PROBE_ID_COLUMN};
use crate::error::ValidationError;

/// Columns that cannot be told apart if repeated.
const CONTRACT_COLUMNS: [&str; 2] = [METHYLATION_CALL_COLUMN, PROBE_ID_COLUMN];

// ---------------------------------------------------------------------------
// Bed loader
// ---------------------------------------------------------------------------

/// Load a methylation bed file.
///
/// The first non-blank line is the header; fields on every line are
/// separated by one or more spaces or tabs.
pub fn load_bed(path: &Path) -> Result<Table, ValidationError> {
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| ValidationError::MalformedTable {
        origin: origin.clone(),
        reason: format!("cannot read file: {e}"),
    })?;
    let table = parse_table(&text, &origin)?;
    debug!("loaded {} rows from {origin}", table.len());
    Ok(table)
}

/// Parse whitespace-delimited text into a [`Table`].
///
/// `origin` only labels error messages.  Blank lines are skipped but still
/// counted, so row line numbers match the source.
pub fn parse_table(text: &str, origin: &str) -> Result<Table, ValidationError> {
    let malformed = |reason: String| ValidationError::MalformedTable {
        origin: origin.to_string(),
        reason,
    };

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| malformed("no header line".to_string()))?;
    let header = dedupe_header(header.split_whitespace().collect())
        .map_err(|reason| malformed(format!("line {header_line}: {reason}")))?;

    let mut raw: Vec<Vec<&str>> = vec![Vec::new(); header.len()];
    let mut line_numbers = Vec::new();

    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != header.len() {
            return Err(malformed(format!(
                "line {line_no}: expected {} fields but found {}",
                header.len(),
                fields.len()
            )));
        }
        for (col, field) in raw.iter_mut().zip(fields) {
            col.push(field);
        }
        line_numbers.push(line_no);
    }

    let columns = header
        .iter()
        .zip(raw)
        .map(|(name, cells)| infer_column(name, &cells))
        .collect();

    Ok(Table::new(columns, line_numbers))
}

/// Rename repeated pass-through columns to `name.1`, `name.2`, ...
///
/// A repeated contract column is an error.
fn dedupe_header(header: Vec<&str>) -> Result<Vec<String>, String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut names = Vec::with_capacity(header.len());

    for name in &header {
        let mut unique = name.to_string();
        if seen.contains(&unique) {
            if CONTRACT_COLUMNS.contains(name) {
                return Err(format!("column '{name}' appears more than once in the header"));
            }
            let mut n = 1;
            while seen.contains(&unique) || header.contains(&unique.as_str()) {
                unique = format!("{name}.{n}");
                n += 1;
            }
            debug!("repeated column '{name}' renamed to '{unique}'");
        }
        seen.insert(unique.clone());
        names.push(unique);
    }
    Ok(names)
}

/// A column is `Integer` if every cell parses as one, then `Float`, else `Text`.
fn infer_column(name: &str, cells: &[&str]) -> Column {
    let kind = if cells.is_empty() {
        ColumnKind::Text
    } else if cells.iter().all(|c| c.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if cells.iter().all(|c| c.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else {
        ColumnKind::Text
    };

    let values = cells
        .iter()
        .map(|c| match kind {
            ColumnKind::Integer => c.parse().map(CellValue::Integer).ok(),
            ColumnKind::Float => c.parse().map(CellValue::Float).ok(),
            ColumnKind::Text => None,
        })
        .zip(cells)
        .map(|(parsed, raw)| parsed.unwrap_or_else(|| CellValue::Text(raw.to_string())))
        .collect();

    Column {
        name: name.to_string(),
        kind,
        values,
        raw: cells.iter().map(|c| c.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Probe reference loader
// ---------------------------------------------------------------------------

/// Read `probes.csv` out of a model archive.
///
/// Identifiers come from the `probe_id` column when the header has one,
/// otherwise from the first column.
pub fn read_probe_reference(archive_path: &Path) -> Result<ProbeReference, ValidationError> {
    let unreadable = |source: zip::result::ZipError| ValidationError::ArchiveUnreadable {
        archive: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| unreadable(e.into()))?;
    let mut archive = zip::ZipArchive::new(file).map_err(unreadable)?;
    let member = match archive.by_name(PROBES_MEMBER) {
        Ok(member) => member,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ValidationError::MissingMandatoryFile {
                member: PROBES_MEMBER.to_string(),
                archive: archive_path.to_path_buf(),
            })
        }
        Err(e) => return Err(unreadable(e)),
    };

    let origin = format!("{}:{PROBES_MEMBER}", archive_path.display());
    let malformed = |reason: String| ValidationError::MalformedTable {
        origin: origin.clone(),
        reason,
    };

    let mut reader = csv::Reader::from_reader(member);
    let headers = reader
        .headers()
        .map_err(|e| malformed(format!("reading header: {e}")))?
        .clone();
    if headers.is_empty() {
        return Err(malformed("no header line".to_string()));
    }
    let id_idx = headers.iter().position(|h| h == "probe_id").unwrap_or(0);

    let mut ids = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| malformed(format!("row {}: {e}", row_no + 1)))?;
        let id = record
            .get(id_idx)
            .ok_or_else(|| malformed(format!("row {}: missing probe id", row_no + 1)))?;
        ids.push(id.trim().to_string());
    }

    debug!("read {} probe ids from {origin}", ids.len());
    Ok(ProbeReference::new(ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(dir: &TempDir, members: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.path().join("model.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        for (name, body) in members {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_parse_splits_on_whitespace_runs() {
        let table = parse_table("probe_id \t methylation_call\tdepth\np1   0\t12\np2\t1  7\n", "t")
            .unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, ["probe_id", "methylation_call", "depth"]);
        assert_eq!(table.len(), 2);

        let calls = table.column("methylation_call").unwrap();
        assert_eq!(calls.kind, ColumnKind::Integer);
        assert_eq!(calls.values, [CellValue::Integer(0), CellValue::Integer(1)]);

        let probes = table.column("probe_id").unwrap();
        assert_eq!(probes.kind, ColumnKind::Text);
        assert_eq!(probes.values[1], CellValue::Text("p2".to_string()));
    }

    #[test]
    fn test_column_kind_inference() {
        let table = parse_table("a b c\n1 1.5 x\n2 2 3\n", "t").unwrap();
        assert_eq!(table.column("a").unwrap().kind, ColumnKind::Integer);
        assert_eq!(table.column("b").unwrap().kind, ColumnKind::Float);
        assert_eq!(
            table.column("b").unwrap().values,
            [CellValue::Float(1.5), CellValue::Float(2.0)]
        );
        // One non-numeric cell keeps the whole column as text.
        assert_eq!(table.column("c").unwrap().kind, ColumnKind::Text);
        assert_eq!(
            table.column("c").unwrap().values[1],
            CellValue::Text("3".to_string())
        );
    }

    #[test]
    fn test_blank_lines_keep_line_numbers() {
        let table = parse_table("probe_id methylation_call\np1 0\n\np2 1\n", "t").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.line_number(0), Some(2));
        assert_eq!(table.line_number(1), Some(4));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let err = parse_table("probe_id methylation_call\np1 0\np2\n", "sample.bed").unwrap_err();
        match err {
            ValidationError::MalformedTable { origin, reason } => {
                assert_eq!(origin, "sample.bed");
                assert!(reason.contains("line 3"), "{reason}");
                assert!(reason.contains("expected 2 fields but found 1"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_long_row_is_malformed() {
        let err = parse_table("probe_id methylation_call\np1 0 extra\n", "t").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedTable { .. }));
    }

    #[test]
    fn test_empty_header_is_malformed() {
        assert!(matches!(
            parse_table("\n  \n", "t"),
            Err(ValidationError::MalformedTable { .. })
        ));
    }

    #[test]
    fn test_repeated_contract_column_is_malformed() {
        for text in [
            "probe_id probe_id methylation_call\np1 p2 0\n",
            "probe_id methylation_call methylation_call\np1 0 1\n",
        ] {
            match parse_table(text, "t") {
                Err(ValidationError::MalformedTable { reason, .. }) => {
                    assert!(reason.contains("appears more than once"), "{reason}");
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_repeated_pass_through_column_is_renamed() {
        let table = parse_table("probe_id methylation_call score score score\np1 0 1 2 3\n", "t")
            .unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, ["probe_id", "methylation_call", "score", "score.1", "score.2"]);
        assert_eq!(table.column("score.1").unwrap().values, [CellValue::Integer(2)]);
    }

    #[test]
    fn test_renamed_column_skips_names_in_use() {
        let table = parse_table("score score score.1\n1 2 3\n", "t").unwrap();
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, ["score", "score.2", "score.1"]);
    }

    #[test]
    fn test_header_only_table() {
        let table = parse_table("probe_id methylation_call\n", "t").unwrap();
        assert!(table.is_empty());
        assert!(table.has_column("probe_id"));
    }

    #[test]
    fn test_load_bed_twice_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.bed");
        std::fs::write(&path, "chr start probe_id methylation_call\nchr1 100 cg01 1\nchr1 200 cg02 0\n")
            .unwrap();

        let first = load_bed(&path).unwrap();
        let second = load_bed(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_load_missing_bed_is_malformed() {
        let dir = TempDir::new().unwrap();
        let err = load_bed(&dir.path().join("absent.bed")).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedTable { .. }));
    }

    #[test]
    fn test_read_probe_reference_uses_probe_id_column() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, &[("probes.csv", "chrom,probe_id\nchr1,cg01\nchr2,cg02\n")]);

        let probes = read_probe_reference(&path).unwrap();
        assert_eq!(probes.len(), 2);
        assert!(probes.contains("cg01"));
        assert!(!probes.contains("chr1"));
    }

    #[test]
    fn test_read_probe_reference_falls_back_to_first_column() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, &[("probes.csv", "ID_REF,chrom\ncg07,chr1\n")]);

        let probes = read_probe_reference(&path).unwrap();
        assert_eq!(probes, ProbeReference::new(["cg07"]));
    }

    #[test]
    fn test_read_probe_reference_without_member() {
        let dir = TempDir::new().unwrap();
        let path = write_zip(&dir, &[("model.onnx", "")]);

        let err = read_probe_reference(&path).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingMandatoryFile { ref member, .. } if member == "probes.csv"
        ));
    }
}
