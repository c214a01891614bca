//! Storefront records: a profile's at-most-one catalog container.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ProfileId, StorefrontId};

/// Minimum accepted storefront name length.
pub const STOREFRONT_NAME_MIN_LEN: usize = 5;
/// Maximum accepted storefront name length.
pub const STOREFRONT_NAME_MAX_LEN: usize = 100;

/// Storefront row held by the relational store.
///
/// `owner_profile_id` is unique — the relational constraint is the final
/// arbiter of the one-storefront-per-profile invariant; the service-level
/// pre-check only exists to produce a clean duplicate error instead of a
/// raw constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storefront {
    /// Row id assigned by the store.
    pub id: StorefrontId,
    /// Display name.
    pub name: String,
    /// Owning profile; unique per storefront.
    pub owner_profile_id: ProfileId,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last row update time.
    pub updated_at: DateTime<Utc>,
}

/// Insertable storefront data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStorefront {
    /// Display name.
    pub name: String,
    /// Owning profile.
    pub owner_profile_id: ProfileId,
}

/// Column-level changes applied to an existing storefront row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontChanges {
    /// Replacement display name, when present.
    pub name: Option<String>,
}
