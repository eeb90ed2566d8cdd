use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::sync::Once;

static INIT: Once = Once::new();

pub struct TestContext {
    pub pool: Pool<Sqlite>,
}

pub async fn init_test_db() -> TestContext {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });

    // Single connection: every `sqlite::memory:` connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    TestContext { pool }
}

/// Seed one unit's roster and return the generated ids in input order.
pub async fn seed_roster(pool: &Pool<Sqlite>, unit_id: &str, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let id = crate::database::roster_repo::insert_person(pool, unit_id, name)
            .await
            .expect("Failed to seed person");
        ids.push(id);
    }
    ids
}
