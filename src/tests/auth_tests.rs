use crate::auth::jwt::TokenType;
use crate::core::errors::StorefrontError;
use crate::core::models::user::{Registration, Role};
use crate::infrastructure::storage::UserStore;
use crate::tests::{RecordingStore, create_test_auth_service, test_jwt};

fn registration(username: &str, email: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        full_name: "Alice Liddell".to_string(),
    }
}

async fn update_user(storage: &RecordingStore, username: &str, change: impl FnOnce(&mut crate::core::models::user::User)) {
    let mut user = storage.find_by_username(username).await.unwrap().unwrap();
    change(&mut user);
    storage.inner.save_user(user).await.unwrap();
}

#[tokio::test]
async fn test_register_issues_tokens_and_hashes_password() {
    let (service, storage) = create_test_auth_service();

    let tokens = service.register(registration("alice", "a@x.com")).await.unwrap();
    assert_eq!(tokens.token_type, "Bearer");
    assert_eq!(tokens.user_info.username, "alice");
    assert_eq!(tokens.user_info.role, "USER");

    let claims = test_jwt().validate_access_token(&tokens.access_token).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.uid, tokens.user_info.id);
    let refresh = test_jwt().validate_token(&tokens.refresh_token).unwrap();
    assert_eq!(refresh.token_type, TokenType::Refresh);

    let stored = storage.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "password123");
    assert_eq!(stored.role, Role::User);
    assert!(stored.enabled);
}

#[tokio::test]
async fn test_register_duplicate_username_makes_no_write() {
    let (service, storage) = create_test_auth_service();
    service.register(registration("alice", "a@x.com")).await.unwrap();

    let result = service.register(registration("alice", "b@x.com")).await;
    match result {
        Err(StorefrontError::Validation(msg)) => assert_eq!(msg, "Username already exists"),
        other => panic!("expected duplicate username, got {:?}", other.map(|t| t.user_info)),
    }
    assert_eq!(storage.user_saves(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email_makes_no_write() {
    let (service, storage) = create_test_auth_service();
    service.register(registration("alice", "a@x.com")).await.unwrap();

    let result = service.register(registration("bob", "a@x.com")).await;
    assert!(matches!(result, Err(StorefrontError::Validation(msg)) if msg == "Email already exists"));
    assert_eq!(storage.user_saves(), 1);
}

#[tokio::test]
async fn test_username_is_checked_before_email() {
    let (service, _) = create_test_auth_service();
    service.register(registration("alice", "a@x.com")).await.unwrap();

    let result = service.register(registration("alice", "a@x.com")).await;
    assert!(matches!(result, Err(StorefrontError::Validation(msg)) if msg == "Username already exists"));
}

#[tokio::test]
async fn test_authenticate_with_valid_and_invalid_credentials() {
    let (service, _) = create_test_auth_service();
    service.register(registration("alice", "a@x.com")).await.unwrap();

    let tokens = service.authenticate("alice", "password123").await.unwrap();
    assert_eq!(tokens.user_info.email, "a@x.com");

    assert!(matches!(
        service.authenticate("alice", "wrong-password").await,
        Err(StorefrontError::InvalidCredentials)
    ));
    assert!(matches!(
        service.authenticate("nobody", "password123").await,
        Err(StorefrontError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_authenticate_honours_account_flags() {
    let (service, storage) = create_test_auth_service();
    service.register(registration("alice", "a@x.com")).await.unwrap();

    update_user(&storage, "alice", |u| u.locked = true).await;
    assert!(matches!(
        service.authenticate("alice", "password123").await,
        Err(StorefrontError::AccountLocked)
    ));

    update_user(&storage, "alice", |u| {
        u.locked = false;
        u.enabled = false;
    })
    .await;
    assert!(matches!(
        service.authenticate("alice", "password123").await,
        Err(StorefrontError::AccountDisabled)
    ));

    update_user(&storage, "alice", |u| {
        u.enabled = true;
        u.credentials_expired = true;
    })
    .await;
    // a wrong password still reads as bad credentials
    assert!(matches!(
        service.authenticate("alice", "wrong-password").await,
        Err(StorefrontError::InvalidCredentials)
    ));
    assert!(matches!(
        service.authenticate("alice", "password123").await,
        Err(StorefrontError::CredentialsExpired)
    ));
}
