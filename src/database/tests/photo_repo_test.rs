use super::*;
use crate::test_utils::{init_test_db, seed_roster};

fn new_photo(person_id: i64, name: &str) -> NewArchivePhoto {
    NewArchivePhoto {
        person_id,
        year: 2024,
        file_path: format!("{person_id}/2024/{name}"),
        original_name: name.to_string(),
        content_hash: format!("hash-{name}"),
    }
}

#[tokio::test]
async fn test_insert_starts_inactive() {
    let ctx = init_test_db().await;
    let ids = seed_roster(&ctx.pool, "7b", &["Kovács Anna"]).await;

    let photo_id = insert_photo(&ctx.pool, &new_photo(ids[0], "a.jpg"))
        .await
        .unwrap();
    let row = get_photo(&ctx.pool, photo_id).await.unwrap().unwrap();
    assert!(!row.is_active);
    assert_eq!(row.year, 2024);
    assert_eq!(count_active_photos(&ctx.pool, ids[0]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_activate_if_none_only_first_wins() {
    let ctx = init_test_db().await;
    let ids = seed_roster(&ctx.pool, "7b", &["Kovács Anna"]).await;
    let person = ids[0];

    let first = insert_photo(&ctx.pool, &new_photo(person, "1.jpg")).await.unwrap();
    let second = insert_photo(&ctx.pool, &new_photo(person, "2.jpg")).await.unwrap();

    assert!(activate_if_none(&ctx.pool, person, first).await.unwrap());
    assert!(!activate_if_none(&ctx.pool, person, second).await.unwrap());
    // Repeating the winning call is a no-op as well.
    assert!(!activate_if_none(&ctx.pool, person, first).await.unwrap());

    let active = get_active_photo(&ctx.pool, person).await.unwrap().unwrap();
    assert_eq!(active.id, first);
    assert_eq!(count_active_photos(&ctx.pool, person).await.unwrap(), 1);
}

#[tokio::test]
async fn test_activate_if_none_is_scoped_per_person() {
    let ctx = init_test_db().await;
    let ids = seed_roster(&ctx.pool, "7b", &["Kovács Anna", "Szabó Levente"]).await;

    let anna = insert_photo(&ctx.pool, &new_photo(ids[0], "a.jpg")).await.unwrap();
    let levente = insert_photo(&ctx.pool, &new_photo(ids[1], "l.jpg")).await.unwrap();

    assert!(activate_if_none(&ctx.pool, ids[0], anna).await.unwrap());
    assert!(activate_if_none(&ctx.pool, ids[1], levente).await.unwrap());
}

#[tokio::test]
async fn test_activate_rejects_foreign_photo() {
    let ctx = init_test_db().await;
    let ids = seed_roster(&ctx.pool, "7b", &["Kovács Anna", "Szabó Levente"]).await;
    let anna = insert_photo(&ctx.pool, &new_photo(ids[0], "a.jpg")).await.unwrap();

    assert!(!activate_if_none(&ctx.pool, ids[1], anna).await.unwrap());
    assert!(!set_active_photo(&ctx.pool, ids[1], anna).await.unwrap());
    assert_eq!(count_active_photos(&ctx.pool, ids[1]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_set_active_photo_swaps_exclusively() {
    let ctx = init_test_db().await;
    let ids = seed_roster(&ctx.pool, "7b", &["Kovács Anna"]).await;
    let person = ids[0];

    let first = insert_photo(&ctx.pool, &new_photo(person, "1.jpg")).await.unwrap();
    let second = insert_photo(&ctx.pool, &new_photo(person, "2.jpg")).await.unwrap();
    activate_if_none(&ctx.pool, person, first).await.unwrap();

    assert!(set_active_photo(&ctx.pool, person, second).await.unwrap());

    let photos = get_photos_for_person(&ctx.pool, person).await.unwrap();
    let active: Vec<i64> = photos.iter().filter(|p| p.is_active).map(|p| p.id).collect();
    assert_eq!(active, vec![second]);
}

#[tokio::test]
async fn test_delete_photo() {
    let ctx = init_test_db().await;
    let ids = seed_roster(&ctx.pool, "7b", &["Kovács Anna"]).await;
    let photo_id = insert_photo(&ctx.pool, &new_photo(ids[0], "a.jpg")).await.unwrap();

    assert!(delete_photo(&ctx.pool, photo_id).await.unwrap());
    assert!(!delete_photo(&ctx.pool, photo_id).await.unwrap());
    assert!(get_photo(&ctx.pool, photo_id).await.unwrap().is_none());
}
