//! Unit tests for [`ReconciliationService`] over mocked stores.

use std::sync::Arc;

use chrono::Utc;
use mockall::Sequence;
use rstest::rstest;
use secrecy::SecretString;

use crate::domain::error::Error;
use crate::domain::identity::{Email, Identity, IdentityId};
use crate::domain::ids::ProfileId;
use crate::domain::ports::{
    IdentityReconciliation, IdentityStoreError, LinkRequest, MockIdentityStore,
    MockProfileRepository, ProfilePersistenceError,
};
use crate::domain::profile::Profile;

use super::ReconciliationService;

fn identity_id() -> IdentityId {
    IdentityId::new("idp_1").expect("valid id")
}

fn identity() -> Identity {
    Identity {
        id: identity_id(),
        email: Email::new("ada@example.com").expect("valid email"),
    }
}

fn profile() -> Profile {
    static NOW: std::sync::OnceLock<chrono::DateTime<Utc>> = std::sync::OnceLock::new();
    let now = *NOW.get_or_init(Utc::now);
    Profile {
        id: ProfileId::new(41),
        identity_id: identity_id(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        created_at: now,
        updated_at: now,
    }
}

fn request() -> LinkRequest {
    LinkRequest {
        email: "Ada@Example.com".into(),
        secret: SecretString::from("hunter2"),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
    }
}

fn service(
    identities: MockIdentityStore,
    profiles: MockProfileRepository,
) -> ReconciliationService<MockIdentityStore, MockProfileRepository> {
    ReconciliationService::new(Arc::new(identities), Arc::new(profiles))
}

#[tokio::test]
async fn link_creates_identity_and_attaches_profile() {
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_email()
        .withf(|email| email.as_str() == "ada@example.com")
        .times(1)
        .return_once(|_| Ok(None));
    identities
        .expect_create()
        .withf(|email, _secret| email.as_str() == "ada@example.com")
        .times(1)
        .return_once(|_, _| Ok(identity()));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(None));
    profiles
        .expect_create()
        .withf(|new, _tx| {
            new.identity_id == identity_id()
                && new.first_name == "Ada"
                && new.last_name == "Lovelace"
        })
        .times(1)
        .return_once(|_, _| Ok(profile()));

    let account = service(identities, profiles)
        .link(request(), None)
        .await
        .expect("link succeeds");
    assert_eq!(account.identity, identity());
    assert_eq!(account.profile.id, ProfileId::new(41));
}

#[tokio::test]
async fn link_reattaches_profile_after_partial_failure() {
    // The identity exists but carries no profile: a crashed earlier link.
    // A retry must reuse the identity and only repeat the profile insert.
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(identity())));
    identities.expect_create().times(0);

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(None));
    profiles
        .expect_create()
        .times(1)
        .return_once(|_, _| Ok(profile()));

    let account = service(identities, profiles)
        .link(request(), None)
        .await
        .expect("retry heals the half-linked account");
    assert_eq!(account.identity.id, identity_id());
}

#[tokio::test]
async fn link_rejects_an_already_onboarded_email() {
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(identity())));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(Some(profile())));
    profiles.expect_create().times(0);

    let error = service(identities, profiles)
        .link(request(), None)
        .await
        .expect_err("second registration rejected");
    assert_eq!(error, Error::duplicate("email"));
}

#[tokio::test]
async fn link_adopts_the_winner_of_a_create_race() {
    let mut seq = Sequence::new();
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_email()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(None));
    identities
        .expect_create()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Err(IdentityStoreError::already_exists("ada@example.com")));
    identities
        .expect_find_by_email()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(Some(identity())));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(None));
    profiles
        .expect_create()
        .times(1)
        .return_once(|_, _| Ok(profile()));

    let account = service(identities, profiles)
        .link(request(), None)
        .await
        .expect("racing link converges on the winner's identity");
    assert_eq!(account.identity.id, identity_id());
}

#[tokio::test]
async fn link_maps_a_duplicate_identity_insert_to_duplicate_email() {
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(identity())));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(None));
    profiles
        .expect_create()
        .times(1)
        .return_once(|_, _| Err(ProfilePersistenceError::duplicate_identity("idp_1")));

    let error = service(identities, profiles)
        .link(request(), None)
        .await
        .expect_err("constraint violation surfaces as duplicate");
    assert_eq!(error, Error::duplicate("email"));
}

#[rstest]
#[case::bad_email(LinkRequest { email: "not-an-email".into(), ..request() }, "email")]
#[case::empty_first_name(LinkRequest { first_name: String::new(), ..request() }, "firstName")]
#[case::empty_secret(LinkRequest { secret: SecretString::from(""), ..request() }, "secret")]
#[tokio::test]
async fn link_rejects_malformed_input_without_touching_stores(
    #[case] request: LinkRequest,
    #[case] field: &str,
) {
    let service = service(MockIdentityStore::new(), MockProfileRepository::new());

    let error = service.link(request, None).await.expect_err("input rejected");
    match error {
        Error::Validation { field: actual, .. } => assert_eq!(actual, field),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_returns_the_account_when_both_sides_exist() {
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_id()
        .withf(|id| id.as_str() == "idp_1")
        .times(1)
        .return_once(|_| Ok(Some(identity())));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(Some(profile())));

    let account = service(identities, profiles)
        .resolve(&identity_id(), None)
        .await
        .expect("resolve succeeds");
    assert_eq!(account.profile, profile());
}

#[tokio::test]
async fn resolve_reports_not_found_when_both_sides_are_absent() {
    let mut identities = MockIdentityStore::new();
    identities.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = service(identities, profiles)
        .resolve(&identity_id(), None)
        .await
        .expect_err("absent account");
    assert_eq!(error, Error::not_found("account"));
}

#[tokio::test]
async fn resolve_flags_a_missing_profile_as_integrity() {
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(identity())));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(None));

    let error = service(identities, profiles)
        .resolve(&identity_id(), None)
        .await
        .expect_err("half-linked account is never a plain absence");
    assert_eq!(error, Error::integrity("account", "profile missing for identity"));
}

#[tokio::test]
async fn resolve_flags_a_missing_identity_as_integrity() {
    let mut identities = MockIdentityStore::new();
    identities.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(Some(profile())));

    let error = service(identities, profiles)
        .resolve(&identity_id(), None)
        .await
        .expect_err("orphaned profile is an integrity fault");
    assert_eq!(error, Error::integrity("account", "identity missing for profile"));
}

#[tokio::test]
async fn unlink_deletes_the_profile_before_the_identity() {
    let mut seq = Sequence::new();
    let mut identities = MockIdentityStore::new();
    let mut profiles = MockProfileRepository::new();

    identities
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(identity())));
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(Some(profile())));
    profiles
        .expect_delete()
        .withf(|id, _tx| *id == ProfileId::new(41))
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(true));
    identities
        .expect_delete()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));

    service(identities, profiles)
        .unlink(&identity_id(), None)
        .await
        .expect("unlink succeeds");
}

#[tokio::test]
async fn unlink_keeps_the_identity_when_the_profile_delete_fails() {
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(identity())));
    identities.expect_delete().times(0);

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(Some(profile())));
    profiles
        .expect_delete()
        .times(1)
        .return_once(|_, _| Err(ProfilePersistenceError::query("deadlock")));

    let error = service(identities, profiles)
        .unlink(&identity_id(), None)
        .await
        .expect_err("profile delete failure aborts the unlink");
    assert!(matches!(error, Error::Fatal { .. }));
}

#[tokio::test]
async fn unlink_reports_not_found_when_the_profile_vanished_mid_flight() {
    let mut identities = MockIdentityStore::new();
    identities
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(identity())));
    identities.expect_delete().times(0);

    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_identity_id()
        .times(1)
        .return_once(|_, _| Ok(Some(profile())));
    profiles.expect_delete().times(1).return_once(|_, _| Ok(false));

    let error = service(identities, profiles)
        .unlink(&identity_id(), None)
        .await
        .expect_err("concurrent unlink already won");
    assert_eq!(error, Error::not_found("account"));
}
