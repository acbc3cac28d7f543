use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, Expense};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

fn expense(category: &str, amount: f64) -> Expense {
    Expense {
        category: category.to_string(),
        amount,
    }
}

#[tokio::test]
async fn create_budget_persists_snapshot_and_returns_tip() {
    let (engine, _db) = engine_with_db().await;

    let (snapshot, tip) = engine
        .create_budget(
            "alice",
            3000.0,
            vec![
                expense("Food", 400.0),
                expense("Transport", 200.0),
                expense("Subscriptions", 50.0),
            ],
            Utc::now(),
        )
        .await
        .unwrap();

    assert_eq!(snapshot.total_expenses, 650.0);
    assert_eq!(snapshot.original_balance, 2350.0);
    assert_eq!(snapshot.shadow_balance, 2555.0);
    assert_eq!(snapshot.shadow_expenses.len(), snapshot.expenses.len());
    assert_eq!(
        tip,
        "Try home cooking or meal prep to cut down food expenses!"
    );

    let stored = engine.list_budgets("alice").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, snapshot.id);
    assert_eq!(stored[0].expenses, snapshot.expenses);
    assert_eq!(stored[0].shadow_expenses, snapshot.shadow_expenses);
    assert_eq!(stored[0].original_balance, snapshot.original_balance);
    assert_eq!(stored[0].shadow_balance, snapshot.shadow_balance);
}

#[tokio::test]
async fn list_budgets_returns_newest_first() {
    let (engine, _db) = engine_with_db().await;

    let yesterday = Utc::now() - Duration::days(1);
    let (older, _) = engine
        .create_budget("alice", 1000.0, vec![expense("Rent", 500.0)], yesterday)
        .await
        .unwrap();
    let (newer, _) = engine
        .create_budget("alice", 1200.0, vec![expense("Rent", 500.0)], Utc::now())
        .await
        .unwrap();

    let stored = engine.list_budgets("alice").await.unwrap();
    assert_eq!(
        stored.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );
}

#[tokio::test]
async fn expense_order_survives_a_round_trip() {
    let (engine, _db) = engine_with_db().await;

    let expenses = vec![
        expense("Utilities", 90.0),
        expense("Food", 90.0),
        expense("Utilities", 30.0),
    ];
    engine
        .create_budget("alice", 500.0, expenses.clone(), Utc::now())
        .await
        .unwrap();

    let stored = engine.list_budgets("alice").await.unwrap();
    assert_eq!(stored[0].expenses, expenses);
    assert_eq!(
        stored[0]
            .shadow_expenses
            .iter()
            .map(|e| e.category.as_str())
            .collect::<Vec<_>>(),
        vec!["Utilities", "Food", "Utilities"]
    );
}

#[tokio::test]
async fn invalid_input_persists_nothing() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_budget("alice", 1000.0, Vec::new(), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("at least one expense is required".to_string())
    );

    let err = engine
        .create_budget(
            "alice",
            f64::NAN,
            vec![expense("Food", 10.0)],
            Utc::now(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    assert!(engine.list_budgets("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn snapshots_are_scoped_per_user() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_budget("alice", 1000.0, vec![expense("Food", 100.0)], Utc::now())
        .await
        .unwrap();

    assert!(engine.list_budgets("bob").await.unwrap().is_empty());
    assert_eq!(engine.list_budgets("alice").await.unwrap().len(), 1);
}
