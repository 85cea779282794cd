//! Export/rebuild behaviour across the catalog and the file repository.

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use lookbook_core::domain::{NewPost, PostDefaults, encode_document};
use lookbook_core::error::RepoError;
use lookbook_core::ports::PostRepository;
use lookbook_infra::{
    CatalogStore, PostFileConfig, PostFileRepository, export_catalog_to_files,
    rebuild_catalog_from_files,
};

fn files_in(tmp: &TempDir) -> PostFileRepository {
    PostFileRepository::new(PostFileConfig::new(tmp.path()))
}

#[tokio::test]
async fn test_load_all_tolerates_malformed_documents() {
    let tmp = TempDir::new().unwrap();
    let files = files_in(&tmp);

    let defaults = PostDefaults::default();
    for (id, title) in [(1, "Coats"), (2, "Boots"), (3, "Scarves")] {
        let post =
            NewPost::new(title, "Fashion", "<p>body</p>").into_post(id, &defaults, Utc::now());
        files.save(&post).await.unwrap();
    }
    std::fs::write(tmp.path().join("truncated.json"), "{\"id\": 4, \"title\": ").unwrap();
    std::fs::write(
        tmp.path().join("no-title.json"),
        r#"{"id": 5, "slug": "x", "content": "c", "category": "Travel",
            "publishedAt": "2024-01-01"}"#,
    )
    .unwrap();

    let outcome = files.load_all().await;

    assert_eq!(outcome.posts.len(), 3);
    assert_eq!(outcome.failures.len(), 2);
    assert!(
        outcome
            .failures
            .iter()
            .all(|f| matches!(f.error, RepoError::MalformedDocument { .. }))
    );
}

#[tokio::test]
async fn test_rebuild_preserves_ids_and_continues_counter() {
    let tmp = TempDir::new().unwrap();
    let files = files_in(&tmp);
    let defaults = PostDefaults::default();

    for id in [5, 2, 9] {
        let post = NewPost::new(format!("Post {id}"), "Travel", "<p>body</p>").into_post(
            id,
            &defaults,
            Utc::now(),
        );
        files.save(&post).await.unwrap();
    }

    let rebuild = rebuild_catalog_from_files(&files).await;
    assert!(rebuild.is_clean());

    let store = rebuild.store;
    assert_eq!(store.find_by_id(9).await.unwrap().unwrap().title, "Post 9");
    assert!(store.find_by_id(2).await.unwrap().is_some());

    let created = store.create(NewPost::new("Fresh", "Travel", "body")).await.unwrap();
    assert_eq!(created.id, 10);
}

#[tokio::test]
async fn test_rebuild_keeps_first_copy_of_duplicate_id() {
    let tmp = TempDir::new().unwrap();
    let files = files_in(&tmp);
    let defaults = PostDefaults::default();
    let base = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();

    let newer = NewPost::new("Renamed", "Beauty", "new")
        .published_at(base + Duration::days(1))
        .into_post(3, &defaults, base);
    let stale = NewPost::new("Original", "Beauty", "old")
        .published_at(base)
        .into_post(3, &defaults, base);
    files.save(&stale).await.unwrap();
    files.save(&newer).await.unwrap();

    let rebuild = rebuild_catalog_from_files(&files).await;

    assert_eq!(rebuild.duplicate_ids, vec![3]);
    assert_eq!(rebuild.store.len().await, 1);
    let kept = rebuild.store.find_by_id(3).await.unwrap().unwrap();
    assert_eq!(kept.title, "Renamed");
}

#[tokio::test]
async fn test_export_then_rebuild_round_trip() {
    let tmp = TempDir::new().unwrap();
    let files = files_in(&tmp);
    let t1 = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    let t2 = t1 + Duration::days(3);
    let t3 = t2 + Duration::days(3);

    let store = CatalogStore::default();
    let mut created = Vec::new();
    for (title, featured, at) in [("First", 0, t1), ("Second", 1, t2), ("Third", 0, t3)] {
        let input = NewPost::new(title, "Lifestyle", "<p>body</p>")
            .featured(featured)
            .published_at(at);
        let post = store.create(input).await.unwrap();
        created.push(post);
    }

    let report = export_catalog_to_files(&store, &files).await.unwrap();
    assert!(report.is_complete());
    assert_eq!(report.written.len(), 3);

    let rebuilt = rebuild_catalog_from_files(&files).await.store;
    let recent = rebuilt.list_recent(Some(2)).await.unwrap();

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0], created[2]);
    assert_eq!(recent[1], created[1]);
    assert_eq!(recent[0].published_at, t3);
    assert_eq!(recent[1].published_at, t2);

    let featured = rebuilt.list_featured(None).await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id, created[1].id);
}

#[tokio::test]
async fn test_rebuild_reproduces_posts_created_now() {
    let tmp = TempDir::new().unwrap();
    let files = files_in(&tmp);

    let store = CatalogStore::default();
    let precise =
        Utc.with_ymd_and_hms(2024, 8, 2, 7, 45, 0).unwrap() + Duration::nanoseconds(987_654_321);
    let dated = store
        .create(NewPost::new("Dated", "Travel", "<p>a</p>").published_at(precise))
        .await
        .unwrap();
    let undated = store
        .create(NewPost::new("Undated", "Travel", "<p>b</p>"))
        .await
        .unwrap();
    assert_eq!(dated.published_at.timestamp_subsec_nanos(), 987_000_000);

    export_catalog_to_files(&store, &files).await.unwrap();
    let rebuilt = rebuild_catalog_from_files(&files).await;
    assert!(rebuilt.is_clean());

    assert_eq!(rebuilt.store.find_by_id(dated.id).await.unwrap(), Some(dated));
    assert_eq!(rebuilt.store.find_by_id(undated.id).await.unwrap(), Some(undated));
}

#[tokio::test]
async fn test_rebuild_skips_document_with_unassignable_id() {
    let tmp = TempDir::new().unwrap();
    let files = files_in(&tmp);

    let post = NewPost::new("Valid", "Beauty", "<p>ok</p>").into_post(
        1,
        &PostDefaults::default(),
        Utc::now(),
    );
    files.save(&post).await.unwrap();
    std::fs::write(
        tmp.path().join("huge-id.json"),
        r#"{"id": 18446744073709551615, "title": "t", "slug": "huge", "content": "c",
            "category": "Beauty", "publishedAt": "2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();

    let outcome = files.load_all().await;
    assert_eq!(outcome.posts.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].file.ends_with("huge-id.json"));

    let rebuilt = rebuild_catalog_from_files(&files).await;
    assert_eq!(rebuilt.load_failures.len(), 1);
    assert_eq!(rebuilt.store.len().await, 1);
    assert_eq!(rebuilt.store.next_id().await, 2);
}

#[tokio::test]
async fn test_export_leaves_stale_files_in_place() {
    let tmp = TempDir::new().unwrap();
    let files = files_in(&tmp);
    let store = CatalogStore::default();
    let mut post = store
        .create(
            NewPost::new("Summer Hats", "Fashion", "body")
                .published_at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        )
        .await
        .unwrap();
    export_catalog_to_files(&store, &files).await.unwrap();

    // A hand edit of the slug produces a second file for the same id.
    post.slug = "summer-hats-edit".to_string();
    std::fs::write(
        tmp.path().join("2024-06-01-summer-hats-edit.json"),
        encode_document(&post).unwrap(),
    )
    .unwrap();
    export_catalog_to_files(&store, &files).await.unwrap();

    let outcome = files.load_all().await;
    assert_eq!(outcome.posts.len(), 2);

    let pruned = files.prune_orphans(&store.list(None).await.unwrap()).await;
    assert_eq!(pruned.removed, vec!["2024-06-01-summer-hats-edit.json".to_string()]);
}
