use super::*;
use crate::store::{MemoryStore, NoStorage};

const USER_JSON: &str =
    r#"{"id":"1","email":"a@b.c","name":null,"strategy":"x","createdAt":"2024-01-01T00:00:00Z"}"#;

// =============================================================
// AuthState derivation
// =============================================================

#[test]
fn no_storage_is_unauthenticated() {
    let state = StoredCredentials::load(&NoStorage).into_auth_state();
    assert_eq!(state, AuthState::unauthenticated());
    assert!(!state.is_authenticated);
}

#[test]
fn token_and_valid_user_is_authenticated() {
    let store = MemoryStore::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, USER_JSON)]);
    let state = StoredCredentials::load(&store).into_auth_state();
    assert!(state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("tok"));
    let user = state.user.unwrap();
    assert_eq!(user.email, "a@b.c");
    assert_eq!(user.strategy.as_deref(), Some("x"));
    assert_eq!(user.name, None);
}

#[test]
fn token_without_user_is_not_authenticated() {
    let store = MemoryStore::with_entries([(TOKEN_KEY, "tok")]);
    let state = StoredCredentials::load(&store).into_auth_state();
    assert!(!state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("tok"));
}

#[test]
fn user_without_token_is_not_authenticated() {
    let store = MemoryStore::with_entries([(USER_KEY, USER_JSON)]);
    let state = StoredCredentials::load(&store).into_auth_state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_some());
}

#[test]
fn empty_values_read_as_absent() {
    let store = MemoryStore::with_entries([(TOKEN_KEY, ""), (USER_KEY, "")]);
    let creds = StoredCredentials::load(&store);
    assert_eq!(creds.token, None);
    assert_eq!(creds.user, CachedUser::Missing);
}

// =============================================================
// Corrupt user records
// =============================================================

#[test]
fn corrupt_user_is_reported_explicitly() {
    let store = MemoryStore::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]);
    let creds = StoredCredentials::load(&store);
    assert!(creds.user.is_corrupt());
    assert!(creds.user.user().is_none());
    match &creds.user {
        CachedUser::Corrupt { raw, .. } => assert_eq!(raw, "{not json"),
        other => panic!("expected corrupt, got {other:?}"),
    }
}

#[test]
fn corrupt_user_degrades_to_absent_with_dangling_token() {
    let store = MemoryStore::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, r#"{"id":"1"}"#)]);
    let state = StoredCredentials::load(&store).into_auth_state();
    assert_eq!(state.user, None);
    assert_eq!(state.token.as_deref(), Some("tok"));
    assert!(!state.is_authenticated);
}

#[test]
fn unknown_user_fields_are_tolerated() {
    let raw = r#"{"id":"1","email":"a@b.c","createdAt":"t","plan":"pro"}"#;
    let store = MemoryStore::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, raw)]);
    let state = StoredCredentials::load(&store).into_auth_state();
    assert!(state.is_authenticated);
}
