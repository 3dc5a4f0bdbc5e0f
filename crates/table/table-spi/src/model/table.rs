//! Columnar order table.

use serde::{Deserialize, Serialize};

use super::column::{Column, ColumnData, DataType};
use super::summary::ColumnSummary;
use crate::error::{Result, TableError};

/// An ordered set of equally long, uniquely named columns.
///
/// Tables are values: every transform in the workspace takes `&Table` and
/// returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// An empty table without columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, checking name uniqueness and equal column lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            if table.has_column(column.name()) {
                return Err(TableError::DuplicateColumn(column.name().to_string()));
            }
            table.upsert_column(column)?;
        }
        Ok(table)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Replace the column with the same name in place, or append it.
    pub fn upsert_column(&mut self, column: Column) -> Result<()> {
        if self.columns.is_empty() {
            self.height = column.len();
        } else if column.len() != self.height {
            return Err(TableError::LengthMismatch {
                column: column.name().to_string(),
                expected: self.height,
                actual: column.len(),
            });
        }

        match self.column_index(column.name()) {
            Some(idx) => self.columns[idx] = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Builder form of [`upsert_column`](Self::upsert_column).
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.upsert_column(column)?;
        Ok(self)
    }

    /// Remove a column and return it.
    pub fn drop_column(&mut self, name: &str) -> Result<Column> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        let column = self.columns.remove(idx);
        if self.columns.is_empty() {
            self.height = 0;
        }
        Ok(column)
    }

    /// Keep the rows whose mask entry is true. Row order is preserved.
    pub fn filter_rows(&self, mask: &[bool]) -> Result<Table> {
        if mask.len() != self.height {
            return Err(TableError::LengthMismatch {
                column: "<row mask>".to_string(),
                expected: self.height,
                actual: mask.len(),
            });
        }

        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.values().filter(mask)))
            .collect();
        let height = mask.iter().filter(|&&m| m).count();
        Ok(Table { columns, height })
    }

    /// Rows ordered by the date column, oldest first.
    ///
    /// The sort is stable, so rows sharing a date keep their relative order.
    /// Rows without a date go last.
    pub fn sort_by_date(&self, name: &str) -> Result<Table> {
        let dates = match self.data(name)? {
            ColumnData::Date(values) => values,
            other => {
                return Err(TableError::TypeMismatch {
                    column: name.to_string(),
                    expected: DataType::Date,
                    actual: other.data_type(),
                })
            }
        };

        let mut order: Vec<usize> = (0..self.height).collect();
        order.sort_by_key(|&i| (dates[i].is_none(), dates[i]));

        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.values().take(&order)))
            .collect();
        Ok(Table {
            columns,
            height: self.height,
        })
    }

    /// Descriptive statistics for every Int and Float column.
    pub fn describe(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .filter_map(|c| {
                c.values()
                    .numeric_values()
                    .map(|values| ColumnSummary::from_values(c.name(), &values))
            })
            .collect()
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let mask: Vec<bool> = (0..self.height).map(|i| i < n).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.values().filter(&mask)))
            .collect();
        Table {
            columns,
            height: n.min(self.height),
        }
    }

    /// Borrow a column's storage.
    pub fn data(&self, name: &str) -> Result<&ColumnData> {
        self.column(name).map(|c| c.values())
    }
}
