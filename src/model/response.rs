use std::fmt::Display;

use super::RepositoryRecord;

/// The outcome of fetching a single page of the repositories listing.
#[derive(Debug, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was fetched and decoded.
    Fetched {
        page_number: u32,
        records: Vec<RepositoryRecord>,
    },

    /// The page could not be fetched or decoded.
    Failed(PageFailure),
}

impl PageOutcome {
    /// Retrieves the number of the page this outcome belongs to.
    pub fn page_number(&self) -> u32 {
        match self {
            PageOutcome::Fetched { page_number, .. } => *page_number,
            PageOutcome::Failed(failure) => failure.page_number,
        }
    }
}

/// A page that was skipped during a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// The 1-based number of the failed page.
    pub page_number: u32,

    /// The cause of the failure.
    pub cause: String,
}

impl PageFailure {
    /// Creates a new `PageFailure` instance.
    pub fn new(page_number: u32, cause: &str) -> Self {
        Self {
            page_number,
            cause: cause.to_string(),
        }
    }
}

impl Display for PageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Page {}: {}", self.page_number, self.cause)
    }
}

/// The result of a collection run: the records of every fetched page in page
/// order, together with the pages that were skipped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Collection {
    pub(crate) records: Vec<RepositoryRecord>,
    pub(crate) failures: Vec<PageFailure>,
}

impl Collection {
    /// Creates a new `Collection` instance.
    pub fn new(records: Vec<RepositoryRecord>, failures: Vec<PageFailure>) -> Self {
        Self { records, failures }
    }

    /// Appends the outcome of the next page.
    pub fn push_outcome(&mut self, outcome: PageOutcome) {
        match outcome {
            PageOutcome::Fetched { records, .. } => self.records.extend(records),
            PageOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    /// Retrieves the collected records.
    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    /// Retrieves the skipped pages.
    pub fn failures(&self) -> &[PageFailure] {
        &self.failures
    }

    /// Returns `true` if no page was skipped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Splits the collection into its records and failures.
    pub fn into_parts(self) -> (Vec<RepositoryRecord>, Vec<PageFailure>) {
        (self.records, self.failures)
    }
}
