//! In-memory adapters backing the driven ports.
//!
//! Three independent failure domains, mirroring the deployed topology:
//! the relational tables behind one mutex, the identity provider behind
//! another, and the image store behind a third. Only the relational
//! store participates in transaction handles; snapshots taken at `begin`
//! give rollback its semantics.

mod category_repository;
mod identity_store;
mod image_store;
mod photo_repository;
mod product_repository;
mod profile_repository;
mod store;
mod storefront_repository;

pub use category_repository::InMemoryCategoryRepository;
pub use identity_store::InMemoryIdentityStore;
pub use image_store::InMemoryImageStore;
pub use photo_repository::InMemoryPhotoRepository;
pub use product_repository::InMemoryProductRepository;
pub use profile_repository::InMemoryProfileRepository;
pub use store::InMemoryDatabase;
pub use storefront_repository::InMemoryStorefrontRepository;
