use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, FromRequest, Json, Path, Request, State},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metrics::counter;
use serde::Deserialize;
use tracing::info;

use crate::{
    application::{error::HttpError, posts::PostService, repos::NewPostParams},
    infra::db::SqliteRepositories,
    presentation::views::{IndexTemplate, PostTemplate, render_template_response},
};

use super::{
    REFRESH_TRIGGER_EVENT, REFRESH_TRIGGER_HEADER, db_health_response,
    middleware::{log_responses, set_request_context},
};

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub db: Arc<SqliteRepositories>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/create", post(create_post))
        .route("/post/{id}", get(post_detail))
        .route("/static/{*path}", get(crate::infra::assets::serve))
        .route("/_health/db", get(health))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

/// Request body for `POST /create`. Both fields are required; anything else
/// is a binding failure. No validation beyond type binding is applied.
#[derive(Debug, Deserialize)]
struct CreatePostInput {
    title: String,
    content: String,
}

async fn index(State(state): State<HttpState>) -> Response {
    match state.posts.index_context().await {
        Ok(view) => render_template_response(IndexTemplate { view }, StatusCode::OK),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn create_post(State(state): State<HttpState>, request: Request) -> Response {
    let input = match bind_create_input(request).await {
        Ok(input) => input,
        Err(err) => return err.into_response(),
    };

    let created = match state
        .posts
        .create(NewPostParams {
            title: input.title,
            content: input.content,
        })
        .await
    {
        Ok(record) => record,
        Err(err) => return HttpError::from(err).into_response(),
    };

    counter!("brezza_posts_created_total").increment(1);
    info!(
        target = "brezza::http::create",
        id = created.id,
        "post created"
    );

    // Same round trip as the client-side convention: signal a refresh via
    // header and carry the updated list view in the response body.
    match state.posts.index_context().await {
        Ok(view) => {
            let mut response = render_template_response(IndexTemplate { view }, StatusCode::OK);
            response.headers_mut().insert(
                REFRESH_TRIGGER_HEADER,
                HeaderValue::from_static(REFRESH_TRIGGER_EVENT),
            );
            response
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn bind_create_input(request: Request) -> Result<CreatePostInput, HttpError> {
    const SOURCE: &str = "infra::http::public::create_post";

    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"));

    if is_json {
        match Json::<CreatePostInput>::from_request(request, &()).await {
            Ok(Json(input)) => Ok(input),
            Err(rejection) => Err(HttpError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                rejection.body_text(),
                rejection.body_text(),
            )),
        }
    } else {
        match Form::<CreatePostInput>::from_request(request, &()).await {
            Ok(Form(input)) => Ok(input),
            Err(rejection) => Err(HttpError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                rejection.body_text(),
                rejection.body_text(),
            )),
        }
    }
}

async fn post_detail(State(state): State<HttpState>, Path(id): Path<String>) -> Response {
    const SOURCE: &str = "infra::http::public::post_detail";

    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "Invalid post ID",
                format!("post id `{id}` is not numeric"),
            )
            .into_response();
        }
    };

    match state.posts.post_detail(id).await {
        Ok(view) => render_template_response(PostTemplate { view }, StatusCode::OK),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn health(State(state): State<HttpState>) -> Response {
    db_health_response(state.db.health_check().await)
}
