use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Row/column numeric data consumed by the renderer.
///
/// Implementations must stay consistent for the duration of one render pass.
/// Missing or non-numeric cells are reported as NaN.
pub trait TabularModel {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    fn value_at(&self, row: usize, column: usize) -> f64;

    /// Display name of a column, used by the legend.
    fn header(&self, _column: usize) -> Option<String> {
        None
    }
}

/// In-memory column-oriented table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableModel {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl TableModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from equally long columns.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> ChartResult<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            if let Some(index) = columns.iter().position(|column| column.len() != rows) {
                return Err(ChartError::InvalidData(format!(
                    "column {index} has {} rows, expected {rows}",
                    columns[index].len()
                )));
            }
        }
        Ok(Self {
            headers: Vec::new(),
            columns,
        })
    }

    #[must_use]
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a row; its length must match the column count of a non-empty table.
    pub fn push_row(&mut self, row: &[f64]) -> ChartResult<()> {
        if self.columns.is_empty() {
            self.columns = row.iter().map(|value| vec![*value]).collect();
            return Ok(());
        }
        if row.len() != self.columns.len() {
            return Err(ChartError::InvalidData(format!(
                "row has {} values, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.push(*value);
        }
        Ok(())
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: f64) -> ChartResult<()> {
        let cell = self
            .columns
            .get_mut(column)
            .and_then(|values| values.get_mut(row))
            .ok_or_else(|| {
                ChartError::InvalidData(format!("cell ({row}, {column}) is out of range"))
            })?;
        *cell = value;
        Ok(())
    }
}

impl TabularModel for TableModel {
    fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn value_at(&self, row: usize, column: usize) -> f64 {
        self.columns
            .get(column)
            .and_then(|values| values.get(row))
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn header(&self, column: usize) -> Option<String> {
        self.headers.get(column).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{TableModel, TabularModel};

    #[test]
    fn out_of_range_cells_read_as_nan() {
        let model = TableModel::from_columns(vec![vec![1.0, 2.0]]).expect("table");
        assert_eq!(model.row_count(), 2);
        assert!(model.value_at(5, 0).is_nan());
        assert!(model.value_at(0, 3).is_nan());
    }

    #[test]
    fn ragged_columns_are_rejected() {
        assert!(TableModel::from_columns(vec![vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn push_row_builds_columns() {
        let mut model = TableModel::new();
        model.push_row(&[1.0, 10.0]).expect("first row");
        model.push_row(&[2.0, 20.0]).expect("second row");
        assert_eq!(model.column_count(), 2);
        assert_eq!(model.value_at(1, 1), 20.0);
        assert!(model.push_row(&[3.0]).is_err());
    }
}
