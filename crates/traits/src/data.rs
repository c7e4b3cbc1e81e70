//! Tabular payload and chart image contracts.

use qrydoc_template::ChartConfig;
use std::fmt::Debug;
use thiserror::Error;

/// The tabular payload a report renders. The engine only needs dimensions
/// and stringified cell values; how the data was loaded (CSV, SQL, a
/// dataframe) is the caller's business.
pub trait TableSource: Debug {
    fn columns(&self) -> Vec<String>;

    fn row_count(&self) -> usize;

    /// The cell at `(row, col)` serialized for display. Out-of-range
    /// coordinates return an empty string.
    fn cell(&self, row: usize, col: usize) -> String;

    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// A plain owned grid of strings. The reference [`TableSource`]
/// implementation, and the one used throughout the test suite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl InMemoryTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

impl TableSource for InMemoryTable {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, col: usize) -> String {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Error, Debug, Clone)]
pub enum ChartRenderError {
    #[error("chart rendering failed: {0}")]
    Failed(String),
    #[error("column '{0}' not found in the payload")]
    UnknownColumn(String),
}

/// Produces a raster image (PNG bytes) for a validated chart
/// configuration. The engine never computes chart pixels itself; a failure
/// here is fatal for the build.
pub trait ChartRenderer: Debug {
    fn render_chart(
        &self,
        config: &ChartConfig,
        table: &dyn TableSource,
    ) -> Result<Vec<u8>, ChartRenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_table_round_trip() {
        let mut table = InMemoryTable::new(vec!["region".into(), "amount".into()]);
        table.push_row(vec!["North".into(), "1200".into()]);
        table.push_row(vec!["South".into(), "800".into()]);

        assert_eq!(table.columns(), ["region", "amount"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 0), "South");
        assert!(!table.is_empty());
    }

    #[test]
    fn out_of_range_cells_are_empty() {
        let table = InMemoryTable::with_rows(vec!["a".into()], vec![vec!["1".into()]]);
        assert_eq!(table.cell(5, 0), "");
        assert_eq!(table.cell(0, 9), "");
    }

    #[test]
    fn empty_table_reports_empty() {
        let table = InMemoryTable::new(vec!["a".into()]);
        assert!(table.is_empty());
    }
}
