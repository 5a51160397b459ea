use std::fmt::Display;

use super::AccountName;

/// A request to the GitHub REST API
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Request {
    /// A request to fetch the metadata of an account, which carries its repositories count.
    AccountMetadata(AccountMetadataRequest),

    /// A request to fetch one page of the repositories listing of an account.
    RepositoriesPage(RepositoriesPageRequest),
}

impl Request {
    /// Creates a dummy `RepositoriesPage` request for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy_repositories_page(page_number: u32) -> Self {
        Self::RepositoriesPage(RepositoriesPageRequest::new("dummy", 100, page_number))
    }
}

impl Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::AccountMetadata(request) => write!(f, "{}", request),
            Request::RepositoriesPage(request) => write!(f, "{}", request),
        }
    }
}

/// An account metadata request being made to the GitHub API
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct AccountMetadataRequest {
    /// The account name.
    pub(crate) account: String,
}

impl AccountMetadataRequest {
    /// Creates a new `AccountMetadataRequest` for the given account.
    pub fn new(account: &AccountName) -> Self {
        Self {
            account: account.to_string(),
        }
    }
}

impl Display for AccountMetadataRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountMetadataRequest: account={}", self.account)
    }
}

/// A repositories listing page request being made to the GitHub API
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct RepositoriesPageRequest {
    /// The account name.
    pub(crate) account: String,

    /// The number of repositories per page.
    pub(crate) per_page: u16,

    /// The 1-based page number.
    pub(crate) page: u32,
}

impl RepositoriesPageRequest {
    /// Creates a new `RepositoriesPageRequest` with the given account, page size and page number.
    pub fn new(account: &str, per_page: u16, page: u32) -> Self {
        Self {
            account: account.to_string(),
            per_page,
            page,
        }
    }

    /// Retrieves the page number.
    pub fn page(&self) -> u32 {
        self.page
    }
}

impl Display for RepositoriesPageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RepositoriesPageRequest: account={}, per_page={}, page={}",
            self.account, self.per_page, self.page
        )
    }
}
