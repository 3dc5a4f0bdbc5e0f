//! Typed columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Float,
    Bool,
    Text,
    Date,
}

impl DataType {
    /// Int and Float columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }

    /// Text columns, the only ones the encoder expands.
    pub fn is_categorical(&self) -> bool {
        matches!(self, DataType::Text)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::Text => "text",
            DataType::Date => "date",
        };
        write!(f, "{}", s)
    }
}

/// Column storage. Every cell may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnData {
    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Bool(_) => DataType::Bool,
            ColumnData::Text(_) => DataType::Text,
            ColumnData::Date(_) => DataType::Date,
        }
    }

    /// Count of absent cells.
    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Float(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Bool(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Date(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Numeric view of an Int or Float column.
    ///
    /// Returns `None` for every other type.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        match self {
            ColumnData::Int(v) => Some(v.iter().map(|x| x.map(|i| i as f64)).collect()),
            ColumnData::Float(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Like [`numeric_values`](Self::numeric_values) but also maps Bool to 0/1.
    pub fn to_f64(&self) -> Option<Vec<Option<f64>>> {
        match self {
            ColumnData::Bool(v) => Some(
                v.iter()
                    .map(|x| x.map(|b| if b { 1.0 } else { 0.0 }))
                    .collect(),
            ),
            _ => self.numeric_values(),
        }
    }

    /// Keep the cells whose mask entry is true, preserving order.
    pub fn filter(&self, mask: &[bool]) -> ColumnData {
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter_map(|(v, &m)| if m { Some(v.clone()) } else { None })
                .collect()
        }

        match self {
            ColumnData::Int(v) => ColumnData::Int(keep(v, mask)),
            ColumnData::Float(v) => ColumnData::Float(keep(v, mask)),
            ColumnData::Bool(v) => ColumnData::Bool(keep(v, mask)),
            ColumnData::Text(v) => ColumnData::Text(keep(v, mask)),
            ColumnData::Date(v) => ColumnData::Date(keep(v, mask)),
        }
    }

    /// Cells at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> ColumnData {
        fn pick<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
            indices.iter().map(|&i| values[i].clone()).collect()
        }

        match self {
            ColumnData::Int(v) => ColumnData::Int(pick(v, indices)),
            ColumnData::Float(v) => ColumnData::Float(pick(v, indices)),
            ColumnData::Bool(v) => ColumnData::Bool(pick(v, indices)),
            ColumnData::Text(v) => ColumnData::Text(pick(v, indices)),
            ColumnData::Date(v) => ColumnData::Date(pick(v, indices)),
        }
    }

    /// Render a cell for delimited output. Absent cells render empty.
    pub fn cell_to_string(&self, row: usize) -> String {
        let cell = match self {
            ColumnData::Int(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Float(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Bool(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Text(v) => v.get(row).cloned().flatten(),
            ColumnData::Date(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|d| d.format("%Y-%m-%d").to_string()),
        };
        cell.unwrap_or_default()
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(values: Vec<i64>) -> Self {
        ColumnData::Int(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(values: Vec<f64>) -> Self {
        ColumnData::Float(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<bool>> for ColumnData {
    fn from(values: Vec<bool>) -> Self {
        ColumnData::Bool(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::Text(values.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<NaiveDate>> for ColumnData {
    fn from(values: Vec<NaiveDate>) -> Self {
        ColumnData::Date(values.into_iter().map(Some).collect())
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, values: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnData {
        &self.values
    }

    pub fn into_values(self) -> ColumnData {
        self.values
    }

    pub fn data_type(&self) -> DataType {
        self.values.data_type()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Same values under a new name.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: self.values,
        }
    }
}
