//! Category rows referenced, never owned, by products.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::CategoryId;

/// Minimum accepted category name length.
pub const CATEGORY_NAME_MIN_LEN: usize = 2;
/// Maximum accepted category name length.
pub const CATEGORY_NAME_MAX_LEN: usize = 100;
/// Maximum accepted category description length.
pub const CATEGORY_DESCRIPTION_MAX_LEN: usize = 500;

/// Category row held by the relational store.
///
/// Categories have an independent lifecycle and are shared across
/// storefronts. Deletion is restricted while any product references the
/// row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Row id assigned by the store.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last row update time.
    pub updated_at: DateTime<Utc>,
}

/// Insertable category data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
}

/// Column-level changes applied to an existing category row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    /// Replacement display name, when present.
    pub name: Option<String>,
    /// Replacement description, when present.
    pub description: Option<String>,
}
