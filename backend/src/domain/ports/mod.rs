//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain talks to its collaborators: the
//! external identity provider, the relational repositories, the image
//! store, and the transaction scope. Driving ports are the service
//! contracts consumed by whatever transport sits in front. Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of stringly-typed blobs.

mod catalog_command;
mod category_repository;
mod identity_reconciliation;
mod identity_store;
mod image_store;
mod photo_command;
mod photo_repository;
mod product_repository;
mod profile_repository;
mod storefront_ownership;
mod storefront_repository;
mod transaction;

pub use catalog_command::{
    CatalogCommand, CategoryPatch, NewCategoryRequest, NewProductRequest, ProductPatch,
};
#[cfg(test)]
pub use catalog_command::MockCatalogCommand;
pub use category_repository::{CategoryPersistenceError, CategoryRepository};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use identity_reconciliation::{IdentityReconciliation, LinkRequest};
#[cfg(test)]
pub use identity_reconciliation::MockIdentityReconciliation;
pub use identity_store::{IdentityStore, IdentityStoreError};
#[cfg(test)]
pub use identity_store::MockIdentityStore;
pub use image_store::{ImageStore, ImageStoreError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use photo_command::{AttachPhotoRequest, PhotoCommand};
#[cfg(test)]
pub use photo_command::MockPhotoCommand;
pub use photo_repository::{PhotoPersistenceError, PhotoRepository};
#[cfg(test)]
pub use photo_repository::MockPhotoRepository;
pub use product_repository::{ProductPersistenceError, ProductRepository};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use profile_repository::{ProfilePersistenceError, ProfileRepository};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use storefront_ownership::{StorefrontDraft, StorefrontOwnership, StorefrontPatch};
#[cfg(test)]
pub use storefront_ownership::MockStorefrontOwnership;
pub use storefront_repository::{StorefrontPersistenceError, StorefrontRepository};
#[cfg(test)]
pub use storefront_repository::MockStorefrontRepository;
pub use transaction::{
    run_in_transaction, TransactionError, TransactionHandle, TransactionScope,
};
#[cfg(test)]
pub use transaction::MockTransactionScope;
