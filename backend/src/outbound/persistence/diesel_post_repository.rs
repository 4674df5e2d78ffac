//! Diesel-backed `PostRepository` adapter.

use async_trait::async_trait;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{
    BoardPost, NewPost, Page, PageRequest, PostBody, PostId, PostTitle, UserId, Username,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostRow};
use super::pool::DbPool;
use super::schema::{posts, users};

/// PostgreSQL implementation of the board post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(row: PostRow, author_username: String) -> Result<BoardPost, PostPersistenceError> {
    let title = PostTitle::new(row.title)
        .map_err(|error| PostPersistenceError::query(format!("stored title invalid: {error}")))?;
    let body = PostBody::new(row.body)
        .map_err(|error| PostPersistenceError::query(format!("stored body invalid: {error}")))?;
    let author_username = Username::new(author_username).map_err(|error| {
        PostPersistenceError::query(format!("stored author username invalid: {error}"))
    })?;
    Ok(BoardPost {
        id: PostId::from(row.id),
        title,
        body,
        author: UserId::from(row.author_id),
        author_username,
        created_at: row.created_at,
    })
}

fn map_post_diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    map_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &NewPost) -> Result<(), PostPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, PostPersistenceError::connection))?;

        let row = NewPostRow {
            id: *post.id.as_uuid(),
            title: post.title.as_ref(),
            body: post.body.as_ref(),
            author_id: *post.author.as_uuid(),
        };

        diesel::insert_into(posts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_post_diesel_error)?;
        Ok(())
    }

    async fn list(&self, request: PageRequest) -> Result<Page<BoardPost>, PostPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, PostPersistenceError::connection))?;

        let rows = posts::table
            .inner_join(users::table)
            .order((posts::created_at.asc(), posts::id.asc()))
            .limit(request.probe_limit())
            .offset(request.offset())
            .select((PostRow::as_select(), users::username))
            .load::<(PostRow, String)>(&mut conn)
            .await
            .map_err(map_post_diesel_error)?;

        let converted = rows
            .into_iter()
            .map(|(row, author)| to_domain(row, author))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::from_probe(converted, request))
    }
}
