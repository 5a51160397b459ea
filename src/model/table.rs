use super::{RepositoryRecord, extract_field};

/// The header of the repository name column.
pub const REPOSITORY_NAME_COLUMN: &str = "repository_name";

/// The header of the language column.
pub const LANGUAGE_COLUMN: &str = "language";

/// A two-column dataset of repository names and their primary languages.
///
/// Both columns always have the same length and index `i` of each refers to
/// the same source record. A `None` cell stands for a missing field.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RepositoryTable {
    repository_names: Vec<Option<String>>,
    languages: Vec<Option<String>>,
}

impl RepositoryTable {
    /// Assembles the table from collected records.
    pub fn assemble(records: &[RepositoryRecord]) -> Self {
        Self {
            repository_names: extract_field(records, "name"),
            languages: extract_field(records, "language"),
        }
    }

    /// Retrieves the repository name column.
    pub fn repository_names(&self) -> &[Option<String>] {
        &self.repository_names
    }

    /// Retrieves the language column.
    pub fn languages(&self) -> &[Option<String>] {
        &self.languages
    }

    /// Iterates over the index-aligned rows of the table.
    pub fn rows(&self) -> impl Iterator<Item = (Option<&str>, Option<&str>)> {
        self.repository_names
            .iter()
            .zip(self.languages.iter())
            .map(|(name, language)| (name.as_deref(), language.as_deref()))
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.repository_names.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.repository_names.is_empty()
    }
}
