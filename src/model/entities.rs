use std::{
    fmt::{Debug, Display},
    ops::Deref,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};

/// The name of an account (user or organization) owning repositories.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct AccountName(pub String);

impl AccountName {
    /// Creates a new `AccountName` instance.
    pub fn new(account: &str) -> Self {
        Self(account.to_string())
    }
}

impl Deref for AccountName {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for AccountName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bearer credential used to authenticate against the API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new `ApiToken` instance.
    pub fn new(token: &str) -> Self {
        Self(token.to_string())
    }

    /// Retrieves the `Authorization` header value for the token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiToken(***)")
    }
}

/// The raw field set of a repository as returned by the API.
///
/// Decodes from any JSON object; the fields are kept as-is.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct RepositoryRecord(Map<String, Value>);

impl RepositoryRecord {
    /// Reads a field of the record.
    ///
    /// Absent and `null` fields yield `None`. Strings are returned verbatim and
    /// any other value is rendered as its JSON text.
    pub fn field(&self, field_name: &str) -> Option<String> {
        match self.0.get(field_name)? {
            Value::Null => None,
            Value::String(value) => Some(value.to_owned()),
            other => Some(other.to_string()),
        }
    }

    /// Retrieves the repository name.
    pub fn name(&self) -> Option<String> {
        self.field("name")
    }

    /// Retrieves the primary language of the repository.
    pub fn language(&self) -> Option<String> {
        self.field("language")
    }

    /// Creates a dummy `RepositoryRecord` for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy(name: &str, language: Option<&str>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from(name));
        fields.insert(
            "language".to_string(),
            language.map(Value::from).unwrap_or(Value::Null),
        );

        Self(fields)
    }

    /// Decodes a `RepositoryRecord` from a JSON fixture for testing purposes.
    #[cfg(test)]
    pub(crate) fn from_json(value: Value) -> Self {
        serde_json::from_value(value).unwrap()
    }
}

impl Display for RepositoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repository: {}, Language: {}",
            self.name().as_deref().unwrap_or("<missing>"),
            self.language().as_deref().unwrap_or("<missing>")
        )
    }
}

/// Projects one field out of each record, preserving order and count.
pub fn extract_field(records: &[RepositoryRecord], field_name: &str) -> Vec<Option<String>> {
    records
        .iter()
        .map(|record| record.field(field_name))
        .collect()
}

/// An account to collect together with the destination of its dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionTarget {
    account: AccountName,
    destination: PathBuf,
}

impl CollectionTarget {
    /// Creates a new `CollectionTarget` instance.
    pub fn new(account: &str, destination: &Path) -> Self {
        Self {
            account: AccountName::new(account),
            destination: destination.to_path_buf(),
        }
    }

    /// Retrieves the account name.
    pub fn account(&self) -> &AccountName {
        &self.account
    }

    /// Retrieves the destination of the dataset.
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}
