use serde_json::Value;

use crate::{Request, StdResult};

/// A trait for fetching raw repository data from the API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryFetcher: Sync + Send {
    /// Issues the request and returns the decoded JSON body.
    async fn fetch(&self, request: &Request) -> StdResult<Value>;
}
