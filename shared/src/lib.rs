//! Wire types, form schemas and permission rules shared by the API client
//! and the browser frontend.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[macro_use]
mod enums;

pub mod capabilities;
pub mod de;
pub mod format;
pub mod forms;
pub mod models;

pub use capabilities::{capabilities, Action, Capabilities, Resource};
pub use enums::{Choice, UnknownVariant};
pub use forms::{FieldErrors, FormSchema};
pub use models::*;

/// Opaque entity identifier.
///
/// The API is not consistent about whether primary keys and foreign keys are
/// sent as strings or integers, so both are accepted and normalized to the
/// string form. Ids are always serialized as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Id(text),
            RawId::Number(number) => Id(number.to_string()),
        })
    }
}

/// Envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// Open filter bag accepted by every list endpoint.
///
/// `search`, `status` and `role` are the filters the API understands on most
/// resources; anything else goes into `extra` and is forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub extra: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn filter(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    /// Set or clear a filter. Blank values clear it.
    pub fn set(&mut self, key: &str, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        match key {
            "search" => self.search = value,
            "status" => self.status = value,
            "role" => self.role = value,
            _ => match value {
                Some(v) => {
                    self.extra.insert(key.to_string(), v);
                }
                None => {
                    self.extra.remove(key);
                }
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "search" => self.search.as_deref(),
            "status" => self.status.as_deref(),
            "role" => self.role.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// True when any filter other than pagination is set.
    pub fn has_filters(&self) -> bool {
        self.search.is_some() || self.status.is_some() || self.role.is_some() || !self.extra.is_empty()
    }

    pub fn clear_filters(&mut self) {
        self.search = None;
        self.status = None;
        self.role = None;
        self.extra.clear();
    }

    /// Query-string pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        if let Some(role) = &self.role {
            pairs.push(("role".to_string(), role.clone()));
        }
        for (key, value) in &self.extra {
            pairs.push((key.clone(), value.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let from_number: Id = serde_json::from_str("42").unwrap();
        let from_text: Id = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn test_paginated_envelope() {
        let json = r#"{"count": 2, "next": null, "previous": null, "results": ["a", "b"]}"#;
        let page: Paginated<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.results, vec!["a", "b"]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery::new()
            .filter("search", "  doe ")
            .filter("status", "active")
            .filter("assigned_officer", "7")
            .page(3)
            .page_size(10);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("search".to_string(), "doe".to_string()),
                ("status".to_string(), "active".to_string()),
                ("assigned_officer".to_string(), "7".to_string()),
                ("page".to_string(), "3".to_string()),
                ("page_size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_filter_clears() {
        let mut query = ListQuery::new().filter("status", "active").filter("is_active", "true");
        query.set("status", Some("   ".to_string()));
        query.set("is_active", None);
        assert_eq!(query.get("status"), None);
        assert!(!query.has_filters());
    }
}
