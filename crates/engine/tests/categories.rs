use sea_orm::Database;

use engine::{CreateTransactionCmd, Engine, EngineError, TransactionKind, User};
use migration::MigratorTrait;

async fn engine_with_user() -> (Engine, User) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();

    let (_, code) = engine
        .register("alice", "alice@example.com", "Passw0rd1")
        .await
        .unwrap();
    let user = engine.verify_email("alice@example.com", &code).await.unwrap();
    (engine, user)
}

#[tokio::test]
async fn defaults_are_visible_to_every_user() {
    let (engine, user) = engine_with_user().await;

    let categories = engine.list_categories(user.id).await.unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    for expected in ["Uncategorized", "Groceries", "Transport", "Salary"] {
        assert!(names.contains(&expected), "missing default {expected}");
    }
    assert!(categories.iter().all(|c| c.is_default));
}

#[tokio::test]
async fn create_and_rename() {
    let (engine, user) = engine_with_user().await;

    let coffee = engine
        .create_category(user.id, "Coffee", Some("#7c3aed"))
        .await
        .unwrap();
    assert_eq!(coffee.name, "Coffee");
    assert_eq!(coffee.color, "#7c3aed");
    assert!(!coffee.is_default);

    let renamed = engine
        .update_category(user.id, coffee.id, Some("Cafes"), None)
        .await
        .unwrap();
    assert_eq!(renamed.name, "Cafes");
    assert_eq!(renamed.color, "#7c3aed");

    // Keeping its own name is not a conflict.
    engine
        .update_category(user.id, coffee.id, Some("Cafes"), Some("#000000"))
        .await
        .unwrap();
}

#[tokio::test]
async fn names_are_unique_per_user_case_insensitive() {
    let (engine, user) = engine_with_user().await;

    engine
        .create_category(user.id, "Coffee", None)
        .await
        .unwrap();
    let err = engine
        .create_category(user.id, "coffee", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn global_names_do_not_block_user_categories() {
    let (engine, user) = engine_with_user().await;

    // A user may shadow a global default with their own category.
    let own = engine
        .create_category(user.id, "Groceries", None)
        .await
        .unwrap();
    assert!(!own.is_default);
    assert_eq!(own.user_id, Some(user.id));

    let groceries: Vec<_> = engine
        .list_categories(user.id)
        .await
        .unwrap()
        .into_iter()
        .filter(|c| c.name == "Groceries")
        .collect();
    assert_eq!(groceries.len(), 2);

    // But not twice.
    let err = engine
        .create_category(user.id, "groceries", None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));
}

#[tokio::test]
async fn globals_cannot_be_edited_or_deleted() {
    let (engine, user) = engine_with_user().await;

    let groceries = engine
        .list_categories(user.id)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Groceries")
        .unwrap();

    let err = engine
        .update_category(user.id, groceries.id, Some("Mine now"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine.delete_category(user.id, groceries.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_reassigns_transactions_to_fallback() {
    let (engine, user) = engine_with_user().await;

    let coffee = engine
        .create_category(user.id, "Coffee", None)
        .await
        .unwrap();
    let tx = engine
        .create_transaction(CreateTransactionCmd::new(
            user.id,
            TransactionKind::Expense,
            350,
            coffee.id,
            "Espresso",
        ))
        .await
        .unwrap();

    engine.delete_category(user.id, coffee.id).await.unwrap();

    let uncategorized = engine
        .list_categories(user.id)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Uncategorized")
        .unwrap();
    let reassigned = engine.transaction(user.id, tx.id).await.unwrap();
    assert_eq!(reassigned.category_id, uncategorized.id);

    // The balance ledger is untouched by reassignment.
    assert_eq!(engine.user_balances(user.id).await.unwrap().balance_minor, -350);
}

#[tokio::test]
async fn owned_categories_are_private() {
    let (engine, alice) = engine_with_user().await;

    let (_, code) = engine
        .register("bob", "bob@example.com", "Passw0rd1")
        .await
        .unwrap();
    let bob = engine.verify_email("bob@example.com", &code).await.unwrap();

    let coffee = engine
        .create_category(alice.id, "Coffee", None)
        .await
        .unwrap();

    let bobs = engine.list_categories(bob.id).await.unwrap();
    assert!(bobs.iter().all(|c| c.id != coffee.id));

    // Bob can reuse the name, but cannot touch Alice's row.
    engine.create_category(bob.id, "Coffee", None).await.unwrap();
    let err = engine.delete_category(bob.id, coffee.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // Alice cannot file transactions under Bob's category.
    let bobs_coffee = engine
        .list_categories(bob.id)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Coffee")
        .unwrap();
    let err = engine
        .create_transaction(CreateTransactionCmd::new(
            alice.id,
            TransactionKind::Expense,
            100,
            bobs_coffee.id,
            "Sneaky",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let (engine, user) = engine_with_user().await;

    let err = engine.create_category(user.id, "   ", None).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}
