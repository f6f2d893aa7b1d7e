use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::CATEGORY_DELIMITER;

/// Opaque key into the category store.
pub type ProductId = String;

/// Root-to-leaf category names, e.g. `["Shoes", "Running"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    pub fn new(levels: Vec<String>) -> Self {
        Self(levels)
    }

    /// Splits a rendered path on [`CATEGORY_DELIMITER`]. Levels are kept verbatim.
    pub fn parse(rendered: &str) -> Self {
        Self(
            rendered
                .split(CATEGORY_DELIMITER)
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn levels(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub(crate) fn push(&mut self, level: String) {
        self.0.push(level);
    }

    pub fn into_levels(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(CATEGORY_DELIMITER))
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for CategoryPath {
    fn from(levels: Vec<String>) -> Self {
        Self(levels)
    }
}

impl From<Vec<&str>> for CategoryPath {
    fn from(levels: Vec<&str>) -> Self {
        levels.into_iter().collect()
    }
}

/// One row returned by a [`CategoryStore`](super::CategoryStore) query.
///
/// `values` is aligned with the requested columns; `None` and `""` both mean "no category".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: ProductId,
    pub values: Vec<Option<String>>,
}

impl CategoryRow {
    pub fn new(id: impl Into<ProductId>, values: Vec<Option<String>>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }

    /// Returns the populated value at `index`, treating empty strings as missing.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }
}
