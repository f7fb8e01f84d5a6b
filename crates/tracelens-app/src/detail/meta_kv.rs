//! Ordered key/value list.

use serde::Serialize;

use super::node::DisplayNode;

/// One labelled row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KvRow {
    pub key: String,
    pub content: DisplayNode,
}

impl KvRow {
    pub fn new(key: impl Into<String>, content: impl Into<DisplayNode>) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
        }
    }
}

/// A vertical list of rows, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetaKv {
    rows: Vec<KvRow>,
}

impl MetaKv {
    pub fn new(rows: Vec<KvRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[KvRow] {
        &self.rows
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.key.as_str()).collect()
    }

    /// Content of the first row with this key.
    pub fn get(&self, key: &str) -> Option<&DisplayNode> {
        self.rows
            .iter()
            .find(|row| row.key == key)
            .map(|row| &row.content)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<KvRow> for MetaKv {
    fn from_iter<I: IntoIterator<Item = KvRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
