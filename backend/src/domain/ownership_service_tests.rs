//! Unit tests for [`OwnershipService`] over a mocked repository.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use crate::domain::error::Error;
use crate::domain::ids::{ProfileId, StorefrontId};
use crate::domain::ports::{
    MockStorefrontRepository, StorefrontDraft, StorefrontOwnership, StorefrontPatch,
    StorefrontPersistenceError,
};
use crate::domain::storefront::Storefront;

use super::OwnershipService;

const OWNER: ProfileId = ProfileId::new(7);

fn storefront() -> Storefront {
    let now = Utc::now();
    Storefront {
        id: StorefrontId::new(3),
        name: "Analytical Engines".into(),
        owner_profile_id: OWNER,
        created_at: now,
        updated_at: now,
    }
}

fn draft() -> StorefrontDraft {
    StorefrontDraft {
        name: "Analytical Engines".into(),
    }
}

fn service(repo: MockStorefrontRepository) -> OwnershipService<MockStorefrontRepository> {
    OwnershipService::new(Arc::new(repo))
}

#[tokio::test]
async fn create_inserts_when_the_profile_owns_nothing() {
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner()
        .withf(|owner, _tx| *owner == OWNER)
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_create()
        .withf(|new, _tx| new.owner_profile_id == OWNER && new.name == "Analytical Engines")
        .times(1)
        .return_once(|_, _| Ok(storefront()));

    let created = service(repo)
        .create(OWNER, draft(), None)
        .await
        .expect("create succeeds");
    assert_eq!(created.id, StorefrontId::new(3));
}

#[tokio::test]
async fn create_rejects_a_second_storefront() {
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner()
        .times(1)
        .return_once(|_, _| Ok(Some(storefront())));
    repo.expect_create().times(0);

    let error = service(repo)
        .create(OWNER, draft(), None)
        .await
        .expect_err("one storefront per profile");
    assert_eq!(error, Error::duplicate("ownerProfileId"));
}

#[tokio::test]
async fn create_maps_a_losing_race_to_the_same_duplicate() {
    // Pre-check saw nothing, then the unique owner constraint fired.
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner().times(1).return_once(|_, _| Ok(None));
    repo.expect_create()
        .times(1)
        .return_once(|_, _| Err(StorefrontPersistenceError::duplicate_owner(OWNER)));

    let error = service(repo)
        .create(OWNER, draft(), None)
        .await
        .expect_err("constraint catches the race");
    assert_eq!(error, Error::duplicate("ownerProfileId"));
}

#[rstest]
#[case::too_short("Shop")]
#[case::too_long("x".repeat(101))]
#[tokio::test]
async fn create_rejects_bad_names_without_touching_the_store(#[case] name: impl Into<String>) {
    let error = service(MockStorefrontRepository::new())
        .create(OWNER, StorefrontDraft { name: name.into() }, None)
        .await
        .expect_err("name rejected");
    assert!(matches!(error, Error::Validation { ref field, .. } if field == "name"));
}

#[tokio::test]
async fn update_renames_the_owned_storefront() {
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner()
        .times(1)
        .return_once(|_, _| Ok(Some(storefront())));
    repo.expect_update()
        .withf(|id, changes, _tx| {
            *id == StorefrontId::new(3) && changes.name.as_deref() == Some("Difference Engines")
        })
        .times(1)
        .return_once(|_, _, _| {
            Ok(Some(Storefront {
                name: "Difference Engines".into(),
                ..storefront()
            }))
        });

    let updated = service(repo)
        .update(
            OWNER,
            StorefrontPatch {
                name: Some("Difference Engines".into()),
            },
            None,
        )
        .await
        .expect("update succeeds");
    assert_eq!(updated.name, "Difference Engines");
}

#[tokio::test]
async fn update_reports_not_found_for_a_storefrontless_profile() {
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner().times(1).return_once(|_, _| Ok(None));
    repo.expect_update().times(0);

    let error = service(repo)
        .update(OWNER, StorefrontPatch::default(), None)
        .await
        .expect_err("nothing to update");
    assert_eq!(error, Error::not_found("storefront"));
}

#[tokio::test]
async fn delete_removes_the_owned_storefront() {
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner()
        .times(1)
        .return_once(|_, _| Ok(Some(storefront())));
    repo.expect_delete()
        .withf(|id, _tx| *id == StorefrontId::new(3))
        .times(1)
        .return_once(|_, _| Ok(true));

    service(repo)
        .delete(OWNER, None)
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn delete_reports_not_found_for_a_storefrontless_profile() {
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner().times(1).return_once(|_, _| Ok(None));
    repo.expect_delete().times(0);

    let error = service(repo)
        .delete(OWNER, None)
        .await
        .expect_err("nothing to delete");
    assert_eq!(error, Error::not_found("storefront"));
}

#[tokio::test]
async fn lookups_map_connection_failures_to_fatal() {
    let mut repo = MockStorefrontRepository::new();
    repo.expect_find_by_owner()
        .times(1)
        .return_once(|_, _| Err(StorefrontPersistenceError::connection("refused")));

    let error = service(repo)
        .owned_by(OWNER, None)
        .await
        .expect_err("failure propagates");
    assert!(matches!(error, Error::Fatal { .. }));
}
