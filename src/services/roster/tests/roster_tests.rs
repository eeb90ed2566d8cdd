use super::*;
use crate::test_utils::{init_test_db, seed_roster};

#[tokio::test]
async fn test_in_memory_lookup_omits_unknown() {
    let roster = vec![
        RosterEntry::new(1, "Kovács Anna"),
        RosterEntry::new(2, "Szabó Levente"),
    ];

    let found = roster.load_roster(&[2, 99]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[&2].name, "Szabó Levente");
}

#[tokio::test]
async fn test_sqlite_roster_batch_lookup() {
    let ctx = init_test_db().await;
    let ids = seed_roster(&ctx.pool, "7b", &["Kovács Anna", "Szabó Levente"]).await;
    let roster = SqliteRoster::new(ctx.pool.clone());

    let found = roster.load_roster(&[ids[0], 4242]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[&ids[0]], RosterEntry::new(ids[0], "Kovács Anna"));
}

#[tokio::test]
async fn test_sqlite_roster_unavailable_is_whole_operation_error() {
    let ctx = init_test_db().await;
    let roster = SqliteRoster::new(ctx.pool.clone());
    ctx.pool.close().await;

    let err = roster.load_roster(&[1]).await.unwrap_err();
    assert!(matches!(err, IntakeError::RosterUnavailable(_)));
}

#[tokio::test]
async fn test_unit_roster() {
    let ctx = init_test_db().await;
    seed_roster(&ctx.pool, "7b", &["Szabó Levente", "Kovács Anna"]).await;
    let roster = SqliteRoster::new(ctx.pool.clone());

    let entries = roster.unit_roster("7b").await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Kovács Anna", "Szabó Levente"]);
}
