use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Id;

/// Reporting pair: one manager supervising one collection officer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub id: Id,
    pub manager: Id,
    #[serde(default)]
    pub manager_name: Option<String>,
    pub collection_officer: Id,
    #[serde(default)]
    pub collection_officer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyPayload {
    pub manager: Id,
    pub collection_officer: Id,
}
