use cinepair::db::Store;
use cinepair::domain::{CatalogQuery, FeedQuery, MessageId, MovieId, UserId};
use cinepair::entities::messages;
use sea_orm::{ActiveModelTrait, Set};

mod common;

use common::TempDb;

async fn open_store(db: &TempDb) -> Store {
    Store::new(&db.url()).await.expect("Failed to open store")
}

#[tokio::test]
async fn test_store_opens_in_memory() {
    let store = Store::new("sqlite::memory:").await.expect("in-memory store");
    store.ping().await.unwrap();
    assert!(store.list_genres().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_temp_database_is_removed_after_use() {
    let db = TempDb::new("cinepair-smoke-cleanup");
    let path = db.path().to_path_buf();

    {
        let store = open_store(&db).await;
        cinepair::services::seed_sample_movies(&store).await.unwrap();
        store.conn.close().await.unwrap();
    }
    assert!(path.exists());

    drop(db);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = TempDb::new("cinepair-smoke-seed");
    let store = open_store(&db).await;

    let created = cinepair::services::seed_sample_movies(&store).await.unwrap();
    assert_eq!(created, cinepair::services::SAMPLE_MOVIES.len());

    let created = cinepair::services::seed_sample_movies(&store).await.unwrap();
    assert_eq!(created, 0);

    let (movies, total) = store.list_movies(&CatalogQuery::default()).await.unwrap();
    assert_eq!(total, 6);
    assert_eq!(movies.len(), 6);
}

#[tokio::test]
async fn test_reopening_keeps_data() {
    let db = TempDb::new("cinepair-smoke-reopen");

    {
        let store = open_store(&db).await;
        cinepair::services::seed_sample_movies(&store).await.unwrap();
    }

    // Migrations run again on an existing database.
    let store = open_store(&db).await;
    let movie = store.find_movie_by_title("Casablanca").await.unwrap();
    assert_eq!(movie.map(|m| m.year), Some(1942));

    let (found, _) = store
        .list_movies(&CatalogQuery::from_params(Some("CASABLANCA"), None, None, None, None, 12, 100))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_is_not_an_error() {
    let db = TempDb::new("cinepair-smoke-users");
    let store = open_store(&db).await;
    let security = db.config().security;

    let first = store
        .create_user("Ann", "ann@example.com", "password1", &security)
        .await
        .unwrap();
    assert!(first.is_some());

    let second = store
        .create_user("Ann Again", " ANN@example.com", "password2", &security)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_toggle_favorite_twice_restores_state() {
    let db = TempDb::new("cinepair-smoke-fav");
    let store = open_store(&db).await;
    cinepair::services::seed_sample_movies(&store).await.unwrap();

    let (user, _) = store
        .create_user("Fan", "fan@example.com", "password1", &db.config().security)
        .await
        .unwrap()
        .unwrap();

    let movie = MovieId::new(2);
    assert!(store.toggle_favorite(user.id, movie).await.unwrap());
    assert_eq!(store.count_favorites(user.id).await.unwrap(), 1);

    assert!(!store.toggle_favorite(user.id, movie).await.unwrap());
    assert_eq!(store.count_favorites(user.id).await.unwrap(), 0);

    assert_eq!(store.count_favorites(UserId::new(999)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_feed_cursor_follows_ids_not_timestamps() {
    let db = TempDb::new("cinepair-smoke-feed");
    let store = open_store(&db).await;
    let security = db.config().security;

    let (alice, _) = store
        .create_user("Alice", "alice@example.com", "password1", &security)
        .await
        .unwrap()
        .unwrap();
    let (bob, _) = store
        .create_user("Bob", "bob@example.com", "password1", &security)
        .await
        .unwrap()
        .unwrap();

    // Concurrent sends can commit in the opposite order to their timestamps.
    let stamps = [
        "2025-03-01T10:00:04.000000Z",
        "2025-03-01T10:00:01.000000Z",
        "2025-03-01T10:00:03.000000Z",
        "2025-03-01T10:00:02.000000Z",
        "2025-03-01T10:00:00.000000Z",
    ];
    let mut inserted = Vec::new();
    for (i, stamp) in stamps.iter().enumerate() {
        let row = messages::ActiveModel {
            content: Set(format!("m{i}")),
            sender_id: Set(alice.id.value()),
            receiver_id: Set(bob.id.value()),
            movie_id: Set(None),
            created_at: Set((*stamp).to_string()),
            ..Default::default()
        }
        .insert(&store.conn)
        .await
        .unwrap();
        inserted.push(row.id);
    }

    let mut seen = Vec::new();
    let mut query = FeedQuery::for_user(bob.id, 2);
    loop {
        let page = store.message_feed(&query).await.unwrap();
        let Some(last) = page.last() else {
            break;
        };
        query = query.after(last.id);
        seen.extend(page.iter().map(|m| m.id.value()));
    }

    assert_eq!(seen, inserted);

    let tail = store
        .message_feed(&FeedQuery::for_user(alice.id, 10).after(MessageId::new(inserted[2])))
        .await
        .unwrap();
    let tail: Vec<i32> = tail.iter().map(|m| m.id.value()).collect();
    assert_eq!(tail, inserted[3..].to_vec());
}
