use std::{fs, path::Path};

use anyhow::Context;
use csv::Writer;
use log::info;

use crate::{LANGUAGE_COLUMN, REPOSITORY_NAME_COLUMN, RepositoryTable, StdResult, TablePersister};

/// A persister that writes repository tables as CSV files.
///
/// Missing cells are written as empty fields, the same way as an empty
/// string: the two cannot be told apart once persisted. An existing file at
/// the destination is overwritten.
#[derive(Debug, Default)]
pub struct CsvPersister;

impl CsvPersister {
    /// Creates a new `CsvPersister` instance.
    pub fn new() -> Self {
        Self
    }

    fn write_table(table: &RepositoryTable, destination: &Path) -> StdResult<u32> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let mut writer = Writer::from_path(destination)
            .with_context(|| format!("Failed to create CSV file: {}", destination.display()))?;
        writer
            .write_record([REPOSITORY_NAME_COLUMN, LANGUAGE_COLUMN])
            .with_context(|| "Failed to write CSV header")?;

        let mut total_rows = 0;
        for (repository_name, language) in table.rows() {
            writer
                .write_record([repository_name.unwrap_or(""), language.unwrap_or("")])
                .with_context(|| format!("Failed to write row #{total_rows}"))?;
            total_rows += 1;
        }
        writer.flush().with_context(|| "Failed to flush CSV writer")?;

        Ok(total_rows)
    }
}

#[async_trait::async_trait]
impl TablePersister for CsvPersister {
    async fn persist(&self, table: &RepositoryTable, destination: &Path) -> StdResult<u32> {
        let total_rows = Self::write_table(table, destination)?;
        info!("Wrote {total_rows} rows to {}", destination.display());

        Ok(total_rows)
    }
}
