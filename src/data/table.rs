// IdeaTable: the in-memory form of an idea submission CSV.
//
// Rows keep every original column so per-row outputs can carry the full
// record through unchanged, with result columns appended on the right.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::columns::{embedding_column_name, ColumnMap};
use super::missing::is_missing;

/// A named result column appended to the original data on export.
///
/// `None` (and NaN) values are written as empty cells, which is how pandas
/// writes missing values.
#[derive(Debug, Clone)]
pub struct OutputColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl OutputColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Idea submissions loaded from CSV, with the role columns resolved.
#[derive(Debug, Clone)]
pub struct IdeaTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    idea_idx: usize,
    condition_idx: usize,
    object_idx: usize,
    participant_idx: Option<usize>,
    participant_column: String,
}

impl IdeaTable {
    /// Load a CSV file. The idea, condition, and object columns are required;
    /// the participant column is resolved if present.
    pub fn read_csv(path: &Path, columns: &ColumnMap) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let table = Self::from_reader(file, columns)
            .with_context(|| format!("Failed to read ideas from {}", path.display()))?;
        debug!(rows = table.len(), path = %path.display(), "Loaded idea table");
        Ok(table)
    }

    /// Parse CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R, columns: &ColumnMap) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(String::from)
            .collect();

        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).with_context(|| {
                format!(
                    "Column '{}' not found. Available columns: {}",
                    name,
                    headers.join(", ")
                )
            })
        };

        let idea_idx = require(&columns.idea)?;
        let condition_idx = require(&columns.condition)?;
        let object_idx = require(&columns.object)?;
        let participant_idx = find(&columns.participant);

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("Malformed CSV record at row {i}"))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(Self {
            headers,
            rows,
            idea_idx,
            condition_idx,
            object_idx,
            participant_idx,
            participant_column: columns.participant.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn idea(&self, row: usize) -> &str {
        &self.rows[row][self.idea_idx]
    }

    pub fn condition(&self, row: usize) -> &str {
        &self.rows[row][self.condition_idx]
    }

    pub fn object(&self, row: usize) -> &str {
        &self.rows[row][self.object_idx]
    }

    /// Participant id for a row, if the table has a participant column.
    pub fn participant(&self, row: usize) -> Option<&str> {
        self.participant_idx.map(|idx| self.rows[row][idx].as_str())
    }

    /// Header used for the participant column in derived outputs.
    pub fn participant_column(&self) -> &str {
        &self.participant_column
    }

    /// Whether the idea cell is empty, whitespace-only, or an NA marker.
    pub fn is_blank(&self, row: usize) -> bool {
        is_missing(self.idea(row))
    }

    /// All idea texts in row order, trimmed. Blank ideas become "".
    pub fn ideas(&self) -> Vec<String> {
        (0..self.len())
            .map(|i| {
                if self.is_blank(i) {
                    String::new()
                } else {
                    self.idea(i).trim().to_string()
                }
            })
            .collect()
    }

    /// Fail with a helpful message when the participant column is absent.
    pub fn require_participant(&self) -> Result<()> {
        if self.participant_idx.is_none() {
            anyhow::bail!(
                "Column '{}' not found; person-level analysis needs a participant id.\n\
                 Pass --participant-column to name it.",
                self.participant_column
            );
        }
        Ok(())
    }

    /// A new table holding only the given rows, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            ..self.clone_without_rows()
        }
    }

    fn clone_without_rows(&self) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: Vec::new(),
            idea_idx: self.idea_idx,
            condition_idx: self.condition_idx,
            object_idx: self.object_idx,
            participant_idx: self.participant_idx,
            participant_column: self.participant_column.clone(),
        }
    }

    /// Read back `embedding_0..embedding_{d-1}` columns written by the
    /// embed command.
    pub fn embedding_columns(&self) -> Result<Vec<Vec<f64>>> {
        let mut indices = Vec::new();
        while let Some(idx) = self
            .headers
            .iter()
            .position(|h| *h == embedding_column_name(indices.len()))
        {
            indices.push(idx);
        }

        if indices.is_empty() {
            anyhow::bail!(
                "No {} columns found in the input.\n\
                 Run `ideaspace embed` first, or drop --from-columns to use the model.",
                embedding_column_name(0)
            );
        }

        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                indices
                    .iter()
                    .map(|&idx| {
                        let cell = cells[idx].trim();
                        cell.parse::<f64>().with_context(|| {
                            format!(
                                "Invalid value '{}' in column {} at row {}",
                                cell, self.headers[idx], row
                            )
                        })
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect()
    }

    /// Write the table to a file with extra columns appended.
    pub fn write_with_columns(&self, path: &Path, extra: &[OutputColumn]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_to(file, extra)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Write the table as CSV with extra columns appended. Every extra
    /// column must have one value per row.
    pub fn write_to<W: Write>(&self, writer: W, extra: &[OutputColumn]) -> Result<()> {
        for column in extra {
            if column.values.len() != self.len() {
                anyhow::bail!(
                    "Column '{}' has {} values but the table has {} rows",
                    column.name,
                    column.values.len(),
                    self.len()
                );
            }
        }

        let mut wtr = csv::Writer::from_writer(writer);

        let header = self
            .headers
            .iter()
            .map(String::as_str)
            .chain(extra.iter().map(|c| c.name.as_str()));
        wtr.write_record(header)?;

        for (i, cells) in self.rows.iter().enumerate() {
            let mut record: Vec<String> = cells.clone();
            record.extend(extra.iter().map(|c| format_cell(c.values[i])));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => v.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ResponseId,condition,object,use
R1,control,brick,build a wall
R1,control,brick,
R2,ai,paperclip,  pick a lock
";

    fn table() -> IdeaTable {
        IdeaTable::from_reader(SAMPLE.as_bytes(), &ColumnMap::default()).unwrap()
    }

    #[test]
    fn test_reads_role_columns() {
        let t = table();
        assert_eq!(t.len(), 3);
        assert_eq!(t.condition(2), "ai");
        assert_eq!(t.object(0), "brick");
        assert_eq!(t.participant(1), Some("R1"));
    }

    #[test]
    fn test_blank_and_trimmed_ideas() {
        let t = table();
        assert!(!t.is_blank(0));
        assert!(t.is_blank(1));
        assert_eq!(t.ideas()[2], "pick a lock");
    }

    #[test]
    fn test_na_marker_idea_is_blank() {
        let t = IdeaTable::from_reader(
            "condition,object,use\nc,o,NA\nc,o,nan\nc,o,a nail\n".as_bytes(),
            &ColumnMap::default(),
        )
        .unwrap();
        assert!(t.is_blank(0));
        assert!(t.is_blank(1));
        assert!(!t.is_blank(2));
        assert_eq!(t.ideas(), vec!["", "", "a nail"]);
    }

    #[test]
    fn test_missing_required_column_names_it() {
        let err = IdeaTable::from_reader("a,b\n1,2\n".as_bytes(), &ColumnMap::default())
            .unwrap_err()
            .to_string();
        assert!(err.contains("'use'"), "got: {err}");
    }

    #[test]
    fn test_missing_participant_is_optional_until_required() {
        let t = IdeaTable::from_reader(
            "condition,object,use\nc,o,x\n".as_bytes(),
            &ColumnMap::default(),
        )
        .unwrap();
        assert_eq!(t.participant(0), None);
        assert!(t.require_participant().is_err());
    }

    #[test]
    fn test_write_appends_columns_and_blanks_missing() {
        let t = table();
        let col = OutputColumn::new("score", vec![Some(0.5), None, Some(f64::NAN)]);
        let mut out = Vec::new();
        t.write_to(&mut out, &[col]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ResponseId,condition,object,use,score");
        assert_eq!(lines[1], "R1,control,brick,build a wall,0.5");
        assert_eq!(lines[2], "R1,control,brick,,");
        assert!(lines[3].ends_with(','));
    }

    #[test]
    fn test_write_rejects_wrong_length_column() {
        let t = table();
        let col = OutputColumn::new("score", vec![Some(1.0)]);
        assert!(t.write_to(Vec::new(), &[col]).is_err());
    }

    #[test]
    fn test_subset_keeps_order() {
        let t = table().subset(&[2, 0]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.condition(0), "ai");
        assert_eq!(t.condition(1), "control");
    }

    #[test]
    fn test_embedding_columns_read_back() {
        let data = "condition,object,use,embedding_0,embedding_1\nc,o,x,0.5,-1\nc,o,y,2,3e-1\n";
        let t = IdeaTable::from_reader(data.as_bytes(), &ColumnMap::default()).unwrap();
        let emb = t.embedding_columns().unwrap();
        assert_eq!(emb, vec![vec![0.5, -1.0], vec![2.0, 0.3]]);
    }

    #[test]
    fn test_embedding_columns_missing() {
        assert!(table().embedding_columns().is_err());
    }
}
