//! CSV table source.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use table_spi::{Column, ColumnData, DataType, Result, Table, TableError, TableSource};

use crate::schema::{infer_type, parse_date, Schema};

/// Loads a delimited file with a header row.
///
/// # Example
///
/// ```rust,no_run
/// use table_core::{CsvTableSource, Schema};
/// use table_spi::TableSource;
///
/// let source = CsvTableSource::new("data/raw/order_train0.csv").with_schema(Schema::orders());
/// let table = source.load().unwrap();
/// println!("{} rows", table.height());
/// ```
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    path: PathBuf,
    name: String,
    schema: Schema,
    delimiter: u8,
}

impl CsvTableSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            path,
            schema: Schema::new(),
            delimiter: b',',
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, reason: impl ToString) -> TableError {
        TableError::SourceUnavailable {
            path: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    /// Parse one column of raw cells into typed storage.
    fn build_column(&self, data_type: DataType, cells: &[String], lines: &[u64]) -> Result<ColumnData> {
        fn typed<T>(
            cells: &[String],
            lines: &[u64],
            expected: DataType,
            parse: impl Fn(&str) -> Option<T>,
        ) -> Result<Vec<Option<T>>> {
            cells
                .iter()
                .zip(lines)
                .map(|(cell, &line)| {
                    let cell = cell.trim();
                    if cell.is_empty() {
                        return Ok(None);
                    }
                    parse(cell).map(Some).ok_or_else(|| TableError::Parse {
                        line,
                        reason: format!("'{}' is not a valid {}", cell, expected),
                    })
                })
                .collect()
        }

        Ok(match data_type {
            DataType::Int => ColumnData::Int(typed(cells, lines, data_type, |s| s.parse().ok())?),
            DataType::Float => {
                ColumnData::Float(typed(cells, lines, data_type, |s| s.parse().ok())?)
            }
            DataType::Bool => ColumnData::Bool(typed(cells, lines, data_type, |s| {
                match s.to_ascii_lowercase().as_str() {
                    "true" | "1" => Some(true),
                    "false" | "0" => Some(false),
                    _ => None,
                }
            })?),
            DataType::Date => ColumnData::Date(typed(cells, lines, data_type, |s| {
                parse_date(s, self.schema.date_formats())
            })?),
            DataType::Text => ColumnData::Text(
                cells
                    .iter()
                    .map(|c| {
                        let c = c.trim();
                        if c.is_empty() {
                            None
                        } else {
                            Some(c.to_string())
                        }
                    })
                    .collect(),
            ),
        })
    }
}

impl TableSource for CsvTableSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Table> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(BufReader::new(file));

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| TableError::Parse {
                line: 1,
                reason: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        let mut lines = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| TableError::Parse {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })?;
            lines.push(record.position().map(|p| p.line()).unwrap_or(0));
            for (idx, cells) in raw.iter_mut().enumerate() {
                cells.push(record.get(idx).unwrap_or("").to_string());
            }
        }

        let mut columns = Vec::with_capacity(headers.len());
        for (name, cells) in headers.iter().zip(&raw) {
            let data_type = self
                .schema
                .declared(name)
                .unwrap_or_else(|| infer_type(cells.iter().map(String::as_str)));
            let values = self.build_column(data_type, cells, &lines)?;
            columns.push(Column::new(name.as_str(), values));
        }

        let table = Table::from_columns(columns).map_err(|e| TableError::Parse {
            line: 1,
            reason: e.to_string(),
        })?;
        tracing::debug!(
            source = %self.name,
            rows = table.height(),
            columns = table.width(),
            "loaded csv table"
        );
        Ok(table)
    }
}
