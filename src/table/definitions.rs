// src/table/definitions.rs
use std::collections::HashSet;
use std::fmt;

/// Column types the editor supports. Each maps 1:1 to an Arrow type; a
/// Parquet file with any other column type is rejected at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnDataType {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ColumnDataType {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnDataType::String | ColumnDataType::Bool)
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub header: String,
    pub data_type: ColumnDataType,
}

/// The in-memory table: named, typed columns over a row-major grid.
///
/// Cell text is the canonical rendering of the typed value (`Display` for
/// numerics and bools, verbatim for strings); `None` is null. The codec
/// parses the text back into the column's type on encode, so the grid plus
/// the specs carry everything needed to reproduce the stored file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableData {
    pub columns: Vec<ColumnSpec>,
    pub grid: Vec<Vec<Option<String>>>,
}

impl TableData {
    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.grid.get(row).and_then(|r| r.get(col)).and_then(|c| c.as_deref())
    }

    /// Overwrites one cell. Returns false (and leaves the grid untouched)
    /// when the coordinates are out of bounds.
    pub fn set_cell(&mut self, row: usize, col: usize, value: Option<String>) -> bool {
        if col >= self.columns.len() {
            return false;
        }
        match self.grid.get_mut(row) {
            Some(cells) => {
                if cells.len() < self.columns.len() {
                    cells.resize(self.columns.len(), None);
                }
                cells[col] = value;
                true
            }
            None => false,
        }
    }

    /// Appends a row of nulls.
    pub fn push_empty_row(&mut self) {
        self.grid.push(vec![None; self.columns.len()]);
    }

    /// Copy of this table with the given row indices removed; surviving rows
    /// keep their relative order. Out-of-range indices are ignored.
    pub fn without_rows(&self, rows: &HashSet<usize>) -> TableData {
        TableData {
            columns: self.columns.clone(),
            grid: self
                .grid
                .iter()
                .enumerate()
                .filter(|(idx, _)| !rows.contains(idx))
                .map(|(_, row)| row.clone())
                .collect(),
        }
    }

    /// Per-column descriptive statistics for the summary toggle.
    pub fn summarize(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                let mut non_null = 0usize;
                let mut nulls = 0usize;
                let mut distinct: HashSet<&str> = HashSet::new();
                let mut numeric: Vec<f64> = Vec::new();
                for row in &self.grid {
                    match row.get(idx).and_then(|c| c.as_deref()) {
                        None => nulls += 1,
                        Some(text) => {
                            non_null += 1;
                            distinct.insert(text);
                            if spec.data_type.is_numeric() {
                                if let Ok(value) = text.parse::<f64>() {
                                    numeric.push(value);
                                }
                            }
                        }
                    }
                }
                let (min, max, mean) = if numeric.is_empty() {
                    (None, None, None)
                } else {
                    let min = numeric.iter().cloned().fold(f64::INFINITY, f64::min);
                    let max = numeric.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                    let mean = numeric.iter().sum::<f64>() / numeric.len() as f64;
                    (Some(min), Some(max), Some(mean))
                };
                ColumnSummary {
                    header: spec.header.clone(),
                    data_type: spec.data_type,
                    non_null,
                    nulls,
                    distinct: distinct.len(),
                    min,
                    max,
                    mean,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub header: String,
    pub data_type: ColumnDataType,
    pub non_null: usize,
    pub nulls: usize,
    pub distinct: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TableData {
        TableData {
            columns: vec![
                ColumnSpec {
                    header: "name".to_string(),
                    data_type: ColumnDataType::String,
                },
                ColumnSpec {
                    header: "count".to_string(),
                    data_type: ColumnDataType::I64,
                },
            ],
            grid: vec![
                vec![Some("alpha".to_string()), Some("3".to_string())],
                vec![Some("beta".to_string()), None],
                vec![Some("alpha".to_string()), Some("5".to_string())],
            ],
        }
    }

    #[test]
    fn set_cell_rejects_out_of_bounds() {
        let mut table = sample_table();
        assert!(!table.set_cell(9, 0, Some("x".to_string())));
        assert!(!table.set_cell(0, 9, Some("x".to_string())));
        assert_eq!(table, sample_table());
    }

    #[test]
    fn set_cell_overwrites_in_bounds() {
        let mut table = sample_table();
        assert!(table.set_cell(1, 1, Some("7".to_string())));
        assert_eq!(table.cell(1, 1), Some("7"));
    }

    #[test]
    fn push_empty_row_appends_nulls() {
        let mut table = sample_table();
        table.push_empty_row();
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.grid[3], vec![None, None]);
    }

    #[test]
    fn without_rows_preserves_order_of_survivors() {
        let table = sample_table();
        let rows: HashSet<usize> = [1].into_iter().collect();
        let reduced = table.without_rows(&rows);
        assert_eq!(reduced.row_count(), 2);
        assert_eq!(reduced.cell(0, 0), Some("alpha"));
        assert_eq!(reduced.cell(1, 1), Some("5"));
    }

    #[test]
    fn without_rows_ignores_out_of_range_indices() {
        let table = sample_table();
        let rows: HashSet<usize> = [42].into_iter().collect();
        assert_eq!(table.without_rows(&rows), table);
    }

    #[test]
    fn summarize_counts_nulls_distincts_and_numeric_stats() {
        let table = sample_table();
        let summaries = table.summarize();

        assert_eq!(summaries[0].non_null, 3);
        assert_eq!(summaries[0].nulls, 0);
        assert_eq!(summaries[0].distinct, 2);
        assert_eq!(summaries[0].min, None);

        assert_eq!(summaries[1].non_null, 2);
        assert_eq!(summaries[1].nulls, 1);
        assert_eq!(summaries[1].min, Some(3.0));
        assert_eq!(summaries[1].max, Some(5.0));
        assert_eq!(summaries[1].mean, Some(4.0));
    }
}
