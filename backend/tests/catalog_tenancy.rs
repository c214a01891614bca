//! Tenant isolation across storefronts, catalogs, and photos, plus
//! transaction rollback over the in-memory relational store.

use rstest::{fixture, rstest};
use rust_decimal::Decimal;

use backend::domain::ports::{
    run_in_transaction, CatalogCommand, NewCategoryRequest, NewProductRequest, ProductPatch,
    ProductRepository, StorefrontDraft, StorefrontOwnership,
};
use backend::domain::{
    CategoryId, Error, PageRequest, ProductId, ProfileId, StorefrontId,
};

mod support;

use support::World;

#[fixture]
fn world() -> World {
    World::new()
}

fn product_request(storefront_id: StorefrontId, category_id: CategoryId, code: &str) -> NewProductRequest {
    NewProductRequest {
        name: "Punch cards".into(),
        code: code.into(),
        description: "Box of eighty-column cards".into(),
        price: Decimal::new(995, 2),
        storefront_id,
        category_id,
    }
}

async fn seed_category(world: &World, name: &str) -> CategoryId {
    world
        .catalog
        .create_category(
            NewCategoryRequest {
                name: name.into(),
                description: String::new(),
            },
            None,
        )
        .await
        .expect("category created")
        .id
}

async fn seed_product(
    world: &World,
    owner: ProfileId,
    storefront_id: StorefrontId,
    category_id: CategoryId,
    code: &str,
) -> ProductId {
    world
        .catalog
        .create_product(owner, product_request(storefront_id, category_id, code), None)
        .await
        .expect("product created")
        .id
}

#[rstest]
#[tokio::test]
async fn a_profile_may_open_exactly_one_storefront(world: World) {
    let account = world.onboard("ada@example.com", "Ada", "Lovelace").await;
    let owner = account.profile.id;
    let first = world.open_storefront(owner, "Analytical Engines").await;

    let error = world
        .storefronts
        .create(
            owner,
            StorefrontDraft {
                name: "Second Venture".into(),
            },
            None,
        )
        .await
        .expect_err("second storefront refused");
    assert_eq!(error, Error::duplicate("ownerProfileId"));

    // The refusal wrote nothing; the first storefront still stands.
    let owned = world
        .storefronts
        .owned_by(owner, None)
        .await
        .expect("lookup succeeds")
        .expect("storefront still owned");
    assert_eq!(owned.id, first.id);
    assert_eq!(owned.name, "Analytical Engines");
}

#[rstest]
#[tokio::test]
async fn product_codes_are_unique_per_storefront_not_globally(world: World) {
    let (alice, alice_store) = world.merchant("alice@example.com", "Alice's Parts").await;
    let (bob, bob_store) = world.merchant("bob@example.com", "Bob's Supplies").await;
    let category = seed_category(&world, "Stationery").await;

    seed_product(&world, alice, alice_store.id, category, "SKU1").await;

    let error = world
        .catalog
        .create_product(alice, product_request(alice_store.id, category, "SKU1"), None)
        .await
        .expect_err("code taken within the storefront");
    assert_eq!(error, Error::duplicate("code"));

    // The same code in another storefront is not a collision.
    seed_product(&world, bob, bob_store.id, category, "SKU1").await;
}

#[rstest]
#[tokio::test]
async fn foreign_products_read_as_absent_on_every_path(world: World) {
    let (alice, alice_store) = world.merchant("alice@example.com", "Alice's Parts").await;
    let (bob, _bob_store) = world.merchant("bob@example.com", "Bob's Supplies").await;
    let category = seed_category(&world, "Stationery").await;
    let product = seed_product(&world, alice, alice_store.id, category, "SKU1").await;

    assert_eq!(
        world
            .catalog
            .get_product(bob, product, None)
            .await
            .expect_err("foreign read misses"),
        Error::not_found("product")
    );
    assert_eq!(
        world
            .catalog
            .update_product(
                bob,
                product,
                ProductPatch {
                    name: Some("Hijacked".into()),
                    ..ProductPatch::default()
                },
                None,
            )
            .await
            .expect_err("foreign update misses"),
        Error::not_found("product")
    );
    assert_eq!(
        world
            .catalog
            .delete_product(bob, product, None)
            .await
            .expect_err("foreign delete misses"),
        Error::not_found("product")
    );

    // Nothing leaked and nothing changed: the owner still sees the row
    // exactly as created.
    let intact = world
        .catalog
        .get_product(alice, product, None)
        .await
        .expect("row survived the foreign attempts");
    assert_eq!(intact.name, "Punch cards");
}

#[rstest]
#[tokio::test]
async fn creating_into_a_foreign_storefront_is_forbidden(world: World) {
    let (_alice, alice_store) = world.merchant("alice@example.com", "Alice's Parts").await;
    let (bob, _bob_store) = world.merchant("bob@example.com", "Bob's Supplies").await;
    let category = seed_category(&world, "Stationery").await;

    let error = world
        .catalog
        .create_product(bob, product_request(alice_store.id, category, "SKU1"), None)
        .await
        .expect_err("claimed storefront is not the caller's");
    assert!(matches!(error, Error::Forbidden { .. }));
}

#[rstest]
#[tokio::test]
async fn callers_without_a_storefront_see_no_storefront_at_all(world: World) {
    let account = world.onboard("ada@example.com", "Ada", "Lovelace").await;
    let category = seed_category(&world, "Stationery").await;

    let error = world
        .catalog
        .create_product(
            account.profile.id,
            product_request(StorefrontId::new(1), category, "SKU1"),
            None,
        )
        .await
        .expect_err("no storefront to sell from");
    assert_eq!(error, Error::not_found("storefront"));
}

#[rstest]
#[tokio::test]
async fn category_deletion_is_restricted_while_referenced(world: World) {
    let (alice, alice_store) = world.merchant("alice@example.com", "Alice's Parts").await;
    let category = seed_category(&world, "Stationery").await;
    let product = seed_product(&world, alice, alice_store.id, category, "SKU1").await;

    assert_eq!(
        world
            .catalog
            .delete_category(category, None)
            .await
            .expect_err("referenced category kept"),
        Error::restricted("category")
    );

    world
        .catalog
        .delete_product(alice, product, None)
        .await
        .expect("product deleted");
    world
        .catalog
        .delete_category(category, None)
        .await
        .expect("unreferenced category deletes");

    assert_eq!(
        world
            .catalog
            .delete_category(category, None)
            .await
            .expect_err("row already gone"),
        Error::not_found("category")
    );
}

#[rstest]
#[tokio::test]
async fn product_listing_windows_the_owned_catalog(world: World) {
    let (alice, alice_store) = world.merchant("alice@example.com", "Alice's Parts").await;
    let (bob, bob_store) = world.merchant("bob@example.com", "Bob's Supplies").await;
    let category = seed_category(&world, "Stationery").await;
    for code in ["SKU1", "SKU2", "SKU3"] {
        seed_product(&world, alice, alice_store.id, category, code).await;
    }
    seed_product(&world, bob, bob_store.id, category, "SKU9").await;

    let window = PageRequest::new(1, 1).expect("valid window");
    let page = world
        .catalog
        .list_products(alice, window, None)
        .await
        .expect("listing succeeds");

    // Totals count the whole owned catalog, never other tenants' rows.
    assert_eq!(page.total, 3);
    let codes: Vec<&str> = page.items.iter().map(|item| item.code.as_str()).collect();
    assert_eq!(codes, ["SKU2"]);
}

#[rstest]
#[tokio::test]
async fn deleting_a_storefront_cascades_its_catalog(world: World) {
    let (alice, alice_store) = world.merchant("alice@example.com", "Alice's Parts").await;
    let category = seed_category(&world, "Stationery").await;
    let product = seed_product(&world, alice, alice_store.id, category, "SKU1").await;

    world
        .storefronts
        .delete(alice, None)
        .await
        .expect("storefront deleted");

    // The product rows went with it, straight at the repository level.
    assert!(world
        .product_rows
        .find_scoped(product, alice_store.id, None)
        .await
        .expect("lookup succeeds")
        .is_none());
    // With the rows gone the category is free to delete.
    world
        .catalog
        .delete_category(category, None)
        .await
        .expect("category no longer referenced");
}

#[rstest]
#[tokio::test]
async fn rolled_back_transactions_leave_no_rows(world: World) {
    let catalog = &world.catalog;
    let result = run_in_transaction(&world.db, |handle| async move {
        catalog
            .create_category(
                NewCategoryRequest {
                    name: "Doomed".into(),
                    description: String::new(),
                },
                Some(handle),
            )
            .await?;
        Err::<(), _>(Error::fatal("simulated downstream failure"))
    })
    .await;
    assert!(result.is_err());

    let page = world
        .catalog
        .list_categories(PageRequest::default(), None)
        .await
        .expect("listing succeeds");
    assert_eq!(page.total, 0);
}

#[rstest]
#[tokio::test]
async fn committed_transactions_keep_their_rows(world: World) {
    let catalog = &world.catalog;
    run_in_transaction(&world.db, |handle| async move {
        catalog
            .create_category(
                NewCategoryRequest {
                    name: "Durable".into(),
                    description: String::new(),
                },
                Some(handle),
            )
            .await
            .map(|_| ())
    })
    .await
    .expect("transaction commits");

    let page = world
        .catalog
        .list_categories(PageRequest::default(), None)
        .await
        .expect("listing succeeds");
    assert_eq!(page.total, 1);
    let names: Vec<&str> = page.items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["Durable"]);
}
