use std::path::Path;

use crate::{RepositoryTable, StdResult};

/// A trait for persisting a repository table to a storage medium.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TablePersister: Sync + Send {
    /// Persists the table to the destination, replacing any previous content.
    /// Returns the number of rows written.
    async fn persist(&self, table: &RepositoryTable, destination: &Path) -> StdResult<u32>;
}
