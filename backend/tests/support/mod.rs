//! Shared wiring for integration tests: every service composed over the
//! in-memory adapters, the way the composition root would wire them over
//! real backends.

#![allow(
    dead_code,
    reason = "each test binary compiles this module but uses a subset of it"
)]

use std::sync::Arc;

use secrecy::SecretString;

use backend::domain::ports::{
    IdentityReconciliation, LinkRequest, StorefrontDraft, StorefrontOwnership,
};
use backend::domain::profile::LinkedAccount;
use backend::domain::storefront::Storefront;
use backend::domain::{
    CatalogService, OwnershipService, PhotoService, ProfileId, ReconciliationService,
};
use backend::outbound::memory::{
    InMemoryCategoryRepository, InMemoryDatabase, InMemoryIdentityStore, InMemoryImageStore,
    InMemoryPhotoRepository, InMemoryProductRepository, InMemoryProfileRepository,
    InMemoryStorefrontRepository,
};

pub type Accounts = ReconciliationService<InMemoryIdentityStore, InMemoryProfileRepository>;
pub type Storefronts = OwnershipService<InMemoryStorefrontRepository>;
pub type Catalog =
    CatalogService<Storefronts, InMemoryProductRepository, InMemoryCategoryRepository>;
pub type Photos = PhotoService<
    Storefronts,
    InMemoryProductRepository,
    InMemoryPhotoRepository,
    InMemoryImageStore,
>;

/// Fully wired backend over in-memory stores.
pub struct World {
    pub db: InMemoryDatabase,
    pub identities: Arc<InMemoryIdentityStore>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub product_rows: Arc<InMemoryProductRepository>,
    pub photo_rows: Arc<InMemoryPhotoRepository>,
    pub images: Arc<InMemoryImageStore>,
    pub accounts: Accounts,
    pub storefronts: Arc<Storefronts>,
    pub catalog: Catalog,
    pub photos: Photos,
}

impl World {
    pub fn new() -> Self {
        let db = InMemoryDatabase::new();
        let identities = Arc::new(InMemoryIdentityStore::new());
        let images = Arc::new(InMemoryImageStore::new());
        let profiles = Arc::new(InMemoryProfileRepository::new(db.clone()));
        let storefront_rows = Arc::new(InMemoryStorefrontRepository::new(db.clone()));
        let product_rows = Arc::new(InMemoryProductRepository::new(db.clone()));
        let category_rows = Arc::new(InMemoryCategoryRepository::new(db.clone()));
        let photo_rows = Arc::new(InMemoryPhotoRepository::new(db.clone()));

        let accounts = ReconciliationService::new(identities.clone(), profiles.clone());
        let storefronts = Arc::new(OwnershipService::new(storefront_rows));
        let catalog = CatalogService::new(
            storefronts.clone(),
            product_rows.clone(),
            category_rows,
        );
        let photos = PhotoService::new(
            storefronts.clone(),
            product_rows.clone(),
            photo_rows.clone(),
            images.clone(),
        );

        Self {
            db,
            identities,
            profiles,
            product_rows,
            photo_rows,
            images,
            accounts,
            storefronts,
            catalog,
            photos,
        }
    }

    /// Register an account end to end.
    pub async fn onboard(&self, email: &str, first: &str, last: &str) -> LinkedAccount {
        self.accounts
            .link(
                LinkRequest {
                    email: email.into(),
                    secret: SecretString::from("correct horse battery staple"),
                    first_name: first.into(),
                    last_name: last.into(),
                },
                None,
            )
            .await
            .expect("onboarding succeeds")
    }

    /// Open the profile's storefront.
    pub async fn open_storefront(&self, owner: ProfileId, name: &str) -> Storefront {
        self.storefronts
            .create(
                owner,
                StorefrontDraft { name: name.into() },
                None,
            )
            .await
            .expect("storefront opens")
    }

    /// Register an account and open its storefront in one step.
    pub async fn merchant(&self, email: &str, store_name: &str) -> (ProfileId, Storefront) {
        let account = self.onboard(email, "Test", "Merchant").await;
        let storefront = self.open_storefront(account.profile.id, store_name).await;
        (account.profile.id, storefront)
    }
}
