use std::sync::Arc;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;

use crate::application::repos::{NewPostParams, PostsRepo, RepoError};
use crate::domain::entities::PostRecord;
use crate::domain::error::DomainError;
use crate::domain::posts;
use crate::presentation::views::{IndexContext, PostCard, PostDetailContext};

const EXCERPT_MAX_LEN: usize = 180;

#[derive(Debug, Error)]
pub enum PostsError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Handler-facing application service over the post store.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostsRepo>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostsRepo>) -> Self {
        Self { posts }
    }

    /// Build the index view over all non-deleted posts. An empty store is a
    /// valid, empty context.
    pub async fn index_context(&self) -> Result<IndexContext, PostsError> {
        let records = self.posts.list_all().await?;
        let posts: Vec<PostCard> = records.iter().map(post_card).collect();
        let post_count = posts.len();

        Ok(IndexContext {
            has_results: post_count > 0,
            post_count,
            posts,
        })
    }

    pub async fn create(&self, params: NewPostParams) -> Result<PostRecord, PostsError> {
        let record = self.posts.create_post(params).await?;
        Ok(record)
    }

    pub async fn post_detail(&self, id: i64) -> Result<PostDetailContext, PostsError> {
        let record = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post"))?;

        Ok(PostDetailContext {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            published: posts::format_human_date(record.created_at),
            iso_date: iso_date(&record),
        })
    }
}

fn post_card(record: &PostRecord) -> PostCard {
    PostCard {
        href: format!("/post/{}", record.id),
        title: record.title.clone(),
        teaser: posts::excerpt(&record.content, EXCERPT_MAX_LEN),
        published: posts::format_human_date(record.created_at),
        iso_date: iso_date(record),
    }
}

fn iso_date(record: &PostRecord) -> String {
    record
        .created_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| record.created_at.to_string())
}
