use std::sync::Arc;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    AccountMetadataRequest, AccountName, Collection, CollectorError, PageFailure, PageOutcome,
    RepositoriesPageRequest, RepositoryCollector, RepositoryFetcher, RepositoryRecord, Request,
    StdResult,
};

/// The default number of repositories requested per page.
pub const DEFAULT_PAGE_SIZE: u16 = 100;

/// The account metadata fields read by the collector.
#[derive(Deserialize, Debug)]
struct AccountMetadata {
    /// Absent or `null` means the account has no public repositories.
    public_repos: Option<u32>,
}

/// A collector that fetches the pages of a repositories listing one after the other
pub struct SequentialCollector {
    fetcher: Arc<dyn RepositoryFetcher>,
}

impl SequentialCollector {
    /// Creates a new `SequentialCollector` instance with the given fetcher.
    pub fn new(fetcher: Arc<dyn RepositoryFetcher>) -> Self {
        Self { fetcher }
    }

    fn decode_total_count(account: &AccountName, metadata: Value) -> StdResult<u32> {
        let metadata: AccountMetadata =
            serde_json::from_value(metadata).map_err(|e| CollectorError::InvalidTotalCount {
                account: account.to_string(),
                reason: e.to_string(),
            })?;

        Ok(metadata.public_repos.unwrap_or(0))
    }

    fn decode_page(page: Value) -> StdResult<Vec<RepositoryRecord>> {
        let records = serde_json::from_value::<Vec<RepositoryRecord>>(page)
            .map_err(|e| CollectorError::InvalidPage(e.to_string()))?;

        Ok(records)
    }

    async fn fetch_page(&self, request: RepositoriesPageRequest) -> PageOutcome {
        let page_number = request.page();
        debug!("Processing request: {request}");
        let result = match self.fetcher.fetch(&Request::RepositoriesPage(request)).await {
            Ok(page) => Self::decode_page(page),
            Err(e) => Err(e),
        };

        match result {
            Ok(records) => {
                for record in &records {
                    debug!("Fetched {record}");
                }
                debug!("Fetched {} repositories from page {page_number}", records.len());
                PageOutcome::Fetched {
                    page_number,
                    records,
                }
            }
            Err(e) => {
                warn!("Failed to fetch page {page_number}: {e:#}");
                PageOutcome::Failed(PageFailure::new(page_number, &format!("{e:#}")))
            }
        }
    }
}

#[async_trait::async_trait]
impl RepositoryCollector for SequentialCollector {
    async fn total_repositories(&self, account: &AccountName) -> StdResult<u32> {
        let request = Request::AccountMetadata(AccountMetadataRequest::new(account));
        debug!("Processing request: {request}");
        let metadata = self.fetcher.fetch(&request).await?;

        Self::decode_total_count(account, metadata)
    }

    async fn collect(&self, account: &AccountName, page_size: u16) -> StdResult<Collection> {
        if page_size == 0 {
            return Err(CollectorError::InvalidPageSize(page_size).into());
        }

        let total_repositories = self.total_repositories(account).await?;
        let total_pages = total_repositories.div_ceil(page_size as u32);
        info!(
            "Collecting {total_repositories} repositories of {account} in {total_pages} page(s) of {page_size}"
        );

        let mut collection = Collection::default();
        for page_number in 1..=total_pages {
            let request = RepositoriesPageRequest::new(account, page_size, page_number);
            let outcome = self.fetch_page(request).await;
            debug!(
                "Processed page {}/{total_pages} of {account}",
                outcome.page_number()
            );
            collection.push_outcome(outcome);
        }

        info!(
            "Collected {} repositories of {account}, failed pages: {}",
            collection.records().len(),
            collection.failures().len()
        );

        Ok(collection)
    }
}
