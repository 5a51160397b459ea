use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use log::{error, info, warn};

use crate::{
    AccountName, CollectionTarget, PageFailure, RepositoryCollector, RepositoryTable, StdResult,
    TablePersister,
};

/// The summary of a dataset exported for one account.
#[derive(Debug, PartialEq, Eq)]
pub struct ExportReport {
    /// The exported account.
    pub account: AccountName,

    /// The destination the dataset was written to.
    pub destination: PathBuf,

    /// The number of rows written.
    pub total_rows: u32,

    /// The pages skipped while collecting.
    pub failed_pages: Vec<PageFailure>,
}

/// Collects, assembles and persists the repository languages dataset of each target.
pub struct DatasetExporter {
    collector: Arc<dyn RepositoryCollector>,
    persister: Arc<dyn TablePersister>,
    page_size: u16,
}

impl DatasetExporter {
    /// Creates a new `DatasetExporter` instance.
    pub fn new(
        collector: Arc<dyn RepositoryCollector>,
        persister: Arc<dyn TablePersister>,
        page_size: u16,
    ) -> Self {
        Self {
            collector,
            persister,
            page_size,
        }
    }

    /// Exports the dataset of a single target.
    pub async fn export_target(&self, target: &CollectionTarget) -> StdResult<ExportReport> {
        let account = target.account();
        let collection = self
            .collector
            .collect(account, self.page_size)
            .await
            .with_context(|| format!("Failed to collect repositories of {account}"))?;
        let (records, failed_pages) = collection.into_parts();
        for failure in &failed_pages {
            warn!("Skipped page of {account}: {failure}");
        }

        let table = RepositoryTable::assemble(&records);
        let total_rows = self
            .persister
            .persist(&table, target.destination())
            .await
            .with_context(|| {
                format!(
                    "Failed to persist dataset of {account} to {}",
                    target.destination().display()
                )
            })?;

        Ok(ExportReport {
            account: account.to_owned(),
            destination: target.destination().to_path_buf(),
            total_rows,
            failed_pages,
        })
    }

    /// Exports every target in order. A failed target is logged and does not
    /// prevent the remaining ones from being exported.
    pub async fn export(&self, targets: &[CollectionTarget]) -> Vec<ExportReport> {
        let mut reports = Vec::with_capacity(targets.len());
        for target in targets {
            info!("Exporting repositories of {}", target.account());
            match self.export_target(target).await {
                Ok(report) => reports.push(report),
                Err(e) => error!("Export of {} aborted: {e:#}", target.account()),
            }
        }

        reports
    }
}
