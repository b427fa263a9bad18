use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use brezza::application::posts::PostService;
use brezza::application::repos::PostsRepo;
use brezza::infra::db::SqliteRepositories;
use brezza::infra::http::{HttpState, build_router};

async fn build_app() -> (Router, Arc<SqliteRepositories>) {
    let pool = SqliteRepositories::connect("sqlite::memory:", 1)
        .await
        .expect("connect to in-memory sqlite");
    SqliteRepositories::run_migrations(&pool)
        .await
        .expect("run migrations");

    let repositories = Arc::new(SqliteRepositories::new(pool));
    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let state = HttpState {
        posts: Arc::new(PostService::new(posts_repo)),
        db: repositories.clone(),
    };

    (build_router(state), repositories)
}

fn form_create(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/create")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn json_create(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("build request")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn body_json(response: axum::response::Response) -> Value {
    let text = body_string(response).await;
    serde_json::from_str(&text).expect("json body")
}

#[tokio::test]
async fn index_on_empty_store_renders_successfully() {
    let (app, _) = build_app().await;

    let response = app.oneshot(get("/")).await.expect("handle request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("No posts yet"));
}

#[tokio::test]
async fn create_re_renders_the_list_and_signals_a_refresh() {
    let (app, _) = build_app().await;

    let response = app
        .oneshot(form_create("title=Hello&content=First%20post"))
        .await
        .expect("handle request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("hx-trigger")
            .and_then(|value| value.to_str().ok()),
        Some("refresh-posts")
    );
    let body = body_string(response).await;
    assert!(body.contains("Hello"));
    assert!(body.contains("First post"));
}

#[tokio::test]
async fn create_accepts_json_bodies() {
    let (app, store) = build_app().await;

    let response = app
        .oneshot(json_create(r#"{"title":"From JSON","content":"api client"}"#))
        .await
        .expect("handle request");

    assert_eq!(response.status(), StatusCode::OK);
    let posts = store.list_all().await.expect("list posts");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "From JSON");
}

#[tokio::test]
async fn create_missing_title_is_rejected_without_mutation() {
    let (app, store) = build_app().await;

    let response = app
        .oneshot(form_create("content=orphaned%20body"))
        .await
        .expect("handle request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    let posts = store.list_all().await.expect("list posts");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn identical_posts_receive_distinct_ids() {
    let (app, store) = build_app().await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(form_create("title=Twin&content=same%20text"))
            .await
            .expect("handle request");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let posts = store.list_all().await.expect("list posts");
    assert_eq!(posts.len(), 2);
    assert_ne!(posts[0].id, posts[1].id);

    for post in &posts {
        let response = app
            .clone()
            .oneshot(get(&format!("/post/{}", post.id)))
            .await
            .expect("handle request");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn post_detail_renders_the_stored_content() {
    let (app, _) = build_app().await;

    let created = app
        .clone()
        .oneshot(form_create("title=Details&content=full%20text%20here"))
        .await
        .expect("handle request");
    assert_eq!(created.status(), StatusCode::OK);

    let response = app.oneshot(get("/post/1")).await.expect("handle request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Details"));
    assert!(body.contains("full text here"));
}

#[tokio::test]
async fn non_numeric_post_id_is_a_client_error() {
    let (app, _) = build_app().await;

    let response = app.oneshot(get("/post/abc")).await.expect("handle request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid post ID");
}

#[tokio::test]
async fn unassigned_post_id_is_not_found() {
    let (app, _) = build_app().await;

    let response = app
        .oneshot(get("/post/999999"))
        .await
        .expect("handle request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Post not found");
}

#[tokio::test]
async fn stylesheet_is_served_from_embedded_assets() {
    let (app, _) = build_app().await;

    let response = app
        .oneshot(get("/static/style.css"))
        .await
        .expect("handle request");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/css"));
}

#[tokio::test]
async fn unknown_static_asset_is_not_found() {
    let (app, _) = build_app().await;

    let response = app
        .oneshot(get("/static/missing.js"))
        .await
        .expect("handle request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn database_health_probe_reports_no_content() {
    let (app, _) = build_app().await;

    let response = app
        .oneshot(get("/_health/db"))
        .await
        .expect("handle request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
