//! Question/answer handlers. Asking and answering are both public.

use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::domain::ports::QuestionPersistenceError;
use crate::domain::{Error, PageRequest, Question, QuestionId};

use super::board::PageQuery;
use super::forms::{AnswerForm, FormErrors, QuestionForm};
use super::nav::see_other;
use super::templates::{render, Pager, QaDetailPage, QaPage, QuestionSummaryView, QuestionView};
use super::{ApiResult, HttpState};

fn map_question_persistence_error(error: QuestionPersistenceError) -> Error {
    match error {
        QuestionPersistenceError::Connection { message } => Error::service_unavailable(message),
        QuestionPersistenceError::Query { message } => Error::internal(message),
        QuestionPersistenceError::NotFound => Error::not_found("no such question"),
    }
}

async fn qa_page_response(
    state: &HttpState,
    request: PageRequest,
    errors: FormErrors,
    title_draft: String,
    content_draft: String,
) -> ApiResult<HttpResponse> {
    let questions = state
        .questions
        .list(request)
        .await
        .map_err(map_question_persistence_error)?;
    let pager = Pager::from_page(&questions);
    render(&QaPage {
        questions: questions
            .items
            .into_iter()
            .map(QuestionSummaryView::from)
            .collect(),
        pager,
        errors,
        title_draft,
        content_draft,
    })
}

/// Fetch one question, folding malformed and unknown ids into not-found.
async fn find_question(state: &HttpState, raw_id: &str) -> ApiResult<Question> {
    let id = QuestionId::parse(raw_id).ok_or_else(|| Error::not_found("no such question"))?;
    state
        .questions
        .find(id)
        .await
        .map_err(map_question_persistence_error)?
        .ok_or_else(|| Error::not_found("no such question"))
}

/// Question listing and submission form.
#[get("/qa")]
pub async fn qa_page(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    qa_page_response(
        &state,
        PageRequest::from_query(query.page),
        FormErrors::default(),
        String::new(),
        String::new(),
    )
    .await
}

/// Question submission. No authentication: anyone may ask.
#[post("/qa")]
pub async fn qa_submit(
    state: web::Data<HttpState>,
    form: web::Form<QuestionForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match form.validate() {
        Ok(new_question) => {
            state
                .questions
                .insert(&new_question)
                .await
                .map_err(map_question_persistence_error)?;
            info!(question_id = %new_question.id, "question submitted");
            Ok(see_other("/qa"))
        }
        Err(errors) => {
            qa_page_response(&state, PageRequest::first(), errors, form.title, form.content).await
        }
    }
}

/// Single question with its answer form.
#[get("/qa/{id}")]
pub async fn qa_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let question = find_question(&state, &path.into_inner()).await?;
    render(&QaDetailPage {
        question: QuestionView::from(question),
        errors: FormErrors::default(),
        answer_draft: String::new(),
    })
}

/// Answer submission.
///
/// Stores the answer text and marks the question answered; the flag only
/// ever moves false→true. Submitting a new answer text later overwrites the
/// stored text and leaves the flag set.
#[post("/qa/{id}")]
pub async fn qa_answer_submit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<AnswerForm>,
) -> ApiResult<HttpResponse> {
    let raw_id = path.into_inner();
    let question = find_question(&state, &raw_id).await?;

    let form = form.into_inner();
    match form.validate() {
        Ok(answer) => {
            state
                .questions
                .store_answer(question.id, &answer)
                .await
                .map_err(map_question_persistence_error)?;
            info!(question_id = %question.id, "answer stored");
            Ok(see_other(&format!("/qa/{}", question.id)))
        }
        Err(errors) => render(&QaDetailPage {
            question: QuestionView::from(question),
            errors,
            answer_draft: form.answer,
        }),
    }
}
