use crate::{AccountName, Collection, StdResult};

/// A trait for collecting every public repository of an account.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryCollector: Sync + Send {
    /// Retrieves the total number of public repositories of the account.
    async fn total_repositories(&self, account: &AccountName) -> StdResult<u32>;

    /// Collects the repositories of the account, page by page.
    ///
    /// Fails only if the total count cannot be determined: failed pages are
    /// reported in the returned `Collection`.
    async fn collect(&self, account: &AccountName, page_size: u16) -> StdResult<Collection>;
}
