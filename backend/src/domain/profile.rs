//! Local profile records linked 1:1 to provider identities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::IdentityId;
use super::ids::ProfileId;

/// Maximum accepted length for a person name field.
pub const PERSON_NAME_MAX_LEN: usize = 120;

/// Profile row held by the relational store.
///
/// The `identity_id` column is unique: at most one profile may exist per
/// identity. A profile whose identity is missing (or the reverse) is an
/// integrity violation, not an ordinary absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Row id assigned by the store.
    pub id: ProfileId,
    /// Identity this profile is linked to.
    pub identity_id: IdentityId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last row update time.
    pub updated_at: DateTime<Utc>,
}

/// Insertable profile data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Identity the new profile links to.
    pub identity_id: IdentityId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Aggregate pairing an identity with its profile.
///
/// Returned by the reconciliation service once both sides are known to
/// exist; the pairing itself is the invariant the service protects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    /// Identity held by the external provider.
    pub identity: super::identity::Identity,
    /// Profile held by the relational store.
    pub profile: Profile,
}
