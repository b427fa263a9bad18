use std::sync::Arc;

use brezza::application::repos::{NewPostParams, PostsRepo};
use brezza::infra::db::SqliteRepositories;

async fn build_store() -> Arc<SqliteRepositories> {
    let pool = SqliteRepositories::connect("sqlite::memory:", 1)
        .await
        .expect("connect to in-memory sqlite");
    SqliteRepositories::run_migrations(&pool)
        .await
        .expect("run migrations");

    Arc::new(SqliteRepositories::new(pool))
}

fn params(title: &str, content: &str) -> NewPostParams {
    NewPostParams {
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn list_all_on_an_empty_store_is_an_empty_sequence() {
    let store = build_store().await;

    let posts = store.list_all().await.expect("list posts");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn create_assigns_fresh_increasing_ids() {
    let store = build_store().await;

    let first = store
        .create_post(params("First", "body"))
        .await
        .expect("create first");
    let second = store
        .create_post(params("Second", "body"))
        .await
        .expect("create second");

    assert!(second.id > first.id);

    let posts = store.list_all().await.expect("list posts");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "First");
    assert_eq!(posts[1].title, "Second");
}

#[tokio::test]
async fn created_posts_carry_store_assigned_timestamps() {
    let store = build_store().await;

    let created = store
        .create_post(params("Stamped", "body"))
        .await
        .expect("create post");

    assert_eq!(created.created_at, created.updated_at);
    assert!(!created.is_deleted());
}

#[tokio::test]
async fn find_by_id_resolves_absence_as_none() {
    let store = build_store().await;

    let found = store.find_by_id(999_999).await.expect("query store");
    assert!(found.is_none());
}

#[tokio::test]
async fn identical_titles_yield_independent_rows() {
    let store = build_store().await;

    let first = store
        .create_post(params("Twin", "same text"))
        .await
        .expect("create first");
    let second = store
        .create_post(params("Twin", "same text"))
        .await
        .expect("create second");

    assert_ne!(first.id, second.id);

    for id in [first.id, second.id] {
        let found = store
            .find_by_id(id)
            .await
            .expect("query store")
            .expect("post exists");
        assert_eq!(found.title, "Twin");
    }
}

#[tokio::test]
async fn soft_deleted_posts_are_excluded_from_reads() {
    let store = build_store().await;

    let kept = store
        .create_post(params("Kept", "visible"))
        .await
        .expect("create kept");
    let removed = store
        .create_post(params("Removed", "hidden"))
        .await
        .expect("create removed");

    sqlx::query("UPDATE posts SET deleted_at = ?1 WHERE id = ?2")
        .bind(time::OffsetDateTime::now_utc())
        .bind(removed.id)
        .execute(store.pool())
        .await
        .expect("mark soft-deleted");

    let posts = store.list_all().await.expect("list posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, kept.id);

    let found = store.find_by_id(removed.id).await.expect("query store");
    assert!(found.is_none());
}
