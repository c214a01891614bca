//! Numeric identifiers for relational records.
//!
//! Every relational row id gets its own newtype so that a profile id can
//! never be passed where a storefront id is expected. The ids are opaque
//! to the domain; the backing store assigns them.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id assigned by the backing store.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// The raw row id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_record_id!(
    /// Identifier of a [`crate::domain::Profile`] row.
    ProfileId
);
define_record_id!(
    /// Identifier of a [`crate::domain::Storefront`] row.
    StorefrontId
);
define_record_id!(
    /// Identifier of a [`crate::domain::catalog::Product`] row.
    ProductId
);
define_record_id!(
    /// Identifier of a [`crate::domain::catalog::Category`] row.
    CategoryId
);
define_record_id!(
    /// Identifier of a [`crate::domain::catalog::Photo`] row.
    PhotoId
);

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn ids_round_trip_through_serde_as_bare_integers() {
        let id = ProductId::new(42);
        let json = serde_json::to_string(&id).expect("id serializes");
        assert_eq!(json, "42");
        let back: ProductId = serde_json::from_str(&json).expect("id deserializes");
        assert_eq!(back, id);
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(StorefrontId::new(7).to_string(), "7");
    }
}
