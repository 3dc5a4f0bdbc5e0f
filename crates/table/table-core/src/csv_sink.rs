//! CSV table sink.

use std::path::{Path, PathBuf};

use table_spi::{Result, Table, TableError, TableSink};

/// Writes a table as a comma separated file with a header row.
///
/// Dates are written as `YYYY-MM-DD`, booleans as `true`/`false` and absent
/// cells as empty fields.
#[derive(Debug, Clone)]
pub struct CsvTableSink {
    path: PathBuf,
    name: String,
}

impl CsvTableSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.display().to_string(),
            path,
        }
    }
}

impl TableSink for CsvTableSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, table: &Table) -> Result<()> {
        let write_err = |e: csv::Error| TableError::Write(format!("{}: {}", self.name, e));

        let mut writer = csv::Writer::from_path(&self.path).map_err(write_err)?;
        writer.write_record(table.column_names()).map_err(write_err)?;
        for row in 0..table.height() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|c| c.values().cell_to_string(row))
                .collect();
            writer.write_record(&record).map_err(write_err)?;
        }
        writer
            .flush()
            .map_err(|e| TableError::Write(format!("{}: {}", self.name, e)))?;

        tracing::debug!(sink = %self.name, rows = table.height(), "wrote csv table");
        Ok(())
    }
}
