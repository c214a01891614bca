//! Domain entities, services, and the ports they are written against.
//!
//! The service layer owns the two protocols the rest of the system leans
//! on: cross-store identity reconciliation (provider identity ↔ local
//! profile, a strict 1:1 with no shared transaction) and the tenant
//! ownership chain (profile → storefront → product/photo). Everything
//! stateful is reached through [`ports`].

pub mod catalog;
pub mod error;
pub mod identity;
pub mod ids;
pub mod page;
pub mod ports;
pub mod profile;
pub mod storefront;
pub(crate) mod validation;

mod catalog_service;
mod ownership_service;
mod photo_service;
mod reconciliation_service;

pub use self::catalog_service::CatalogService;
pub use self::error::{DomainResult, Error};
pub use self::identity::{Email, Identity, IdentityId, IdentityValidationError};
pub use self::ids::{CategoryId, PhotoId, ProductId, ProfileId, StorefrontId};
pub use self::ownership_service::OwnershipService;
pub use self::page::{Page, PageRequest};
pub use self::photo_service::PhotoService;
pub use self::profile::{LinkedAccount, NewProfile, Profile, PERSON_NAME_MAX_LEN};
pub use self::reconciliation_service::ReconciliationService;
pub use self::storefront::{
    NewStorefront, Storefront, StorefrontChanges, STOREFRONT_NAME_MAX_LEN,
    STOREFRONT_NAME_MIN_LEN,
};
