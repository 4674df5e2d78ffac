//! Diesel-backed `QuestionRepository` adapter.

use async_trait::async_trait;
use chrono::Utc;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{QuestionPersistenceError, QuestionRepository};
use crate::domain::{
    AnswerBody, NewQuestion, Page, PageRequest, Question, QuestionBody, QuestionId, QuestionTitle,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewQuestionRow, QuestionRow};
use super::pool::DbPool;
use super::schema::questions;

diesel::define_sql_function! {
    /// SQL `COALESCE` over a nullable timestamp, used to keep the first
    /// answer timestamp when an answer is overwritten.
    fn coalesce(
        value: diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>,
        fallback: diesel::sql_types::Timestamptz,
    ) -> diesel::sql_types::Timestamptz;
}

/// PostgreSQL implementation of the question repository port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(row: QuestionRow) -> Result<Question, QuestionPersistenceError> {
    let title = QuestionTitle::new(row.title).map_err(|error| {
        QuestionPersistenceError::query(format!("stored title invalid: {error}"))
    })?;
    let body = QuestionBody::new(row.body)
        .map_err(|error| QuestionPersistenceError::query(format!("stored body invalid: {error}")))?;
    let answer = row
        .answer
        .map(AnswerBody::new)
        .transpose()
        .map_err(|error| {
            QuestionPersistenceError::query(format!("stored answer invalid: {error}"))
        })?;
    Ok(Question {
        id: QuestionId::from(row.id),
        title,
        body,
        answer,
        answered: row.answered,
        created_at: row.created_at,
        answered_at: row.answered_at,
    })
}

fn map_question_diesel_error(error: diesel::result::Error) -> QuestionPersistenceError {
    map_diesel_error(
        error,
        QuestionPersistenceError::query,
        QuestionPersistenceError::connection,
    )
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(&self, question: &NewQuestion) -> Result<(), QuestionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, QuestionPersistenceError::connection))?;

        let row = NewQuestionRow {
            id: *question.id.as_uuid(),
            title: question.title.as_ref(),
            body: question.body.as_ref(),
        };

        diesel::insert_into(questions::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_question_diesel_error)?;
        Ok(())
    }

    async fn list(
        &self,
        request: PageRequest,
    ) -> Result<Page<Question>, QuestionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, QuestionPersistenceError::connection))?;

        let rows = questions::table
            .order((questions::created_at.asc(), questions::id.asc()))
            .limit(request.probe_limit())
            .offset(request.offset())
            .select(QuestionRow::as_select())
            .load::<QuestionRow>(&mut conn)
            .await
            .map_err(map_question_diesel_error)?;

        let converted = rows
            .into_iter()
            .map(to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::from_probe(converted, request))
    }

    async fn find(&self, id: QuestionId) -> Result<Option<Question>, QuestionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, QuestionPersistenceError::connection))?;

        let row = questions::table
            .find(id.as_uuid())
            .select(QuestionRow::as_select())
            .first::<QuestionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_question_diesel_error)?;

        row.map(to_domain).transpose()
    }

    async fn store_answer(
        &self,
        id: QuestionId,
        answer: &AnswerBody,
    ) -> Result<(), QuestionPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, QuestionPersistenceError::connection))?;

        // `answered` only ever moves false→true here; COALESCE keeps the
        // first answer timestamp when the text is overwritten.
        let updated = diesel::update(questions::table.find(id.as_uuid()))
            .set((
                questions::answer.eq(Some(answer.as_ref())),
                questions::answered.eq(true),
                questions::answered_at
                    .eq(coalesce(questions::answered_at, Utc::now()).nullable()),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_question_diesel_error)?;

        if updated == 0 {
            return Err(QuestionPersistenceError::not_found());
        }
        Ok(())
    }
}
