use sea_orm::Database;

use engine::{Engine, EngineError};
use migration::MigratorTrait;

async fn fresh_engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

#[tokio::test]
async fn register_verify_login_roundtrip() {
    let engine = fresh_engine().await;

    let (user, code) = engine
        .register("alice", "Alice@Example.com", "Passw0rd1")
        .await
        .unwrap();
    // Emails are stored lowercased.
    assert_eq!(user.email, "alice@example.com");
    assert!(!user.verified);
    assert_eq!(user.balance_minor, 0);

    let verified = engine.verify_email("alice@example.com", &code).await.unwrap();
    assert!(verified.verified);

    let token = engine.login("alice@example.com", "Passw0rd1").await.unwrap();
    let resolved = engine.user_by_token(&token).await.unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn login_requires_verification() {
    let engine = fresh_engine().await;

    engine
        .register("alice", "alice@example.com", "Passw0rd1")
        .await
        .unwrap();

    let err = engine
        .login("alice@example.com", "Passw0rd1")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let engine = fresh_engine().await;

    let (_, code) = engine
        .register("alice", "alice@example.com", "Passw0rd1")
        .await
        .unwrap();
    engine.verify_email("alice@example.com", &code).await.unwrap();

    let err = engine
        .login("alice@example.com", "WrongPass1")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));

    let err = engine
        .login("nobody@example.com", "Passw0rd1")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
}

#[tokio::test]
async fn wrong_verification_code_is_rejected() {
    let engine = fresh_engine().await;

    engine
        .register("alice", "alice@example.com", "Passw0rd1")
        .await
        .unwrap();

    let err = engine
        .verify_email("alice@example.com", "not-the-code")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
}

#[tokio::test]
async fn double_verification_conflicts() {
    let engine = fresh_engine().await;

    let (_, code) = engine
        .register("alice", "alice@example.com", "Passw0rd1")
        .await
        .unwrap();
    engine.verify_email("alice@example.com", &code).await.unwrap();

    let err = engine
        .verify_email("alice@example.com", &code)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let engine = fresh_engine().await;

    engine
        .register("alice", "alice@example.com", "Passw0rd1")
        .await
        .unwrap();
    let err = engine
        .register("alice2", "Alice@example.com", "Passw0rd1")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn weak_passwords_are_rejected() {
    let engine = fresh_engine().await;

    for password in ["Sh0rt", "alllowercase1", "ALLUPPERCASE1", "NoDigitsHere"] {
        let err = engine
            .register("alice", "alice@example.com", password)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPassword(_)), "{password}");
    }
}

#[tokio::test]
async fn login_rotates_the_token() {
    let engine = fresh_engine().await;

    let (_, code) = engine
        .register("alice", "alice@example.com", "Passw0rd1")
        .await
        .unwrap();
    engine.verify_email("alice@example.com", &code).await.unwrap();

    let first = engine.login("alice@example.com", "Passw0rd1").await.unwrap();
    let second = engine.login("alice@example.com", "Passw0rd1").await.unwrap();
    assert_ne!(first, second);

    let err = engine.user_by_token(&first).await.unwrap_err();
    assert!(matches!(err, EngineError::Unauthorized(_)));
    engine.user_by_token(&second).await.unwrap();
}
