//! In-memory port implementations and request helpers shared by the
//! integration tests. No test here needs a live database: the doubles mimic
//! the store's observable behaviour, including unique-constraint conflicts.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use async_trait::async_trait;
use chrono::Utc;

use backend::domain::ports::{
    Argon2PasswordHasher, PostPersistenceError, PostRepository, QuestionPersistenceError,
    QuestionRepository, StoreHealth, StoreHealthError, UserPersistenceError, UserRepository,
};
use backend::domain::{
    AccountService, BoardPost, Email, NewPost, NewQuestion, NewUser, Page, PageRequest, Question,
    QuestionId, User, UserId,
};
use backend::inbound::http::HttpState;
use backend::server::AppSettings;

/// In-memory user store enforcing the same uniqueness rules as the schema.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn count(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, user: &NewUser) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        if rows.iter().any(|u| u.username == user.username) {
            return Err(UserPersistenceError::duplicate_username());
        }
        if rows.iter().any(|u| u.email == user.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        rows.push(User {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|u| &u.id == id).cloned())
    }
}

/// In-memory board store; resolves author handles against the user store.
pub struct InMemoryPosts {
    users: Arc<InMemoryUsers>,
    rows: Mutex<Vec<BoardPost>>,
}

impl InMemoryPosts {
    pub fn new(users: Arc<InMemoryUsers>) -> Self {
        Self {
            users,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.rows.lock().expect("rows lock").len()
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn insert(&self, post: &NewPost) -> Result<(), PostPersistenceError> {
        let author = self
            .users
            .find_by_id(&post.author)
            .await
            .map_err(|e| PostPersistenceError::query(e.to_string()))?
            .ok_or_else(|| PostPersistenceError::query("unknown author"))?;
        self.rows.lock().expect("rows lock").push(BoardPost {
            id: post.id,
            title: post.title.clone(),
            body: post.body.clone(),
            author: post.author,
            author_username: author.username,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list(&self, request: PageRequest) -> Result<Page<BoardPost>, PostPersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        let window: Vec<BoardPost> = rows
            .iter()
            .skip(request.offset() as usize)
            .take(request.probe_limit() as usize)
            .cloned()
            .collect();
        Ok(Page::from_probe(window, request))
    }
}

/// In-memory question store with monotonic answer semantics.
#[derive(Default)]
pub struct InMemoryQuestions {
    rows: Mutex<Vec<Question>>,
}

impl InMemoryQuestions {
    pub fn first_id(&self) -> Option<QuestionId> {
        self.rows.lock().expect("rows lock").first().map(|q| q.id)
    }

    pub fn get(&self, id: QuestionId) -> Option<Question> {
        self.rows
            .lock()
            .expect("rows lock")
            .iter()
            .find(|q| q.id == id)
            .cloned()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestions {
    async fn insert(&self, question: &NewQuestion) -> Result<(), QuestionPersistenceError> {
        self.rows.lock().expect("rows lock").push(Question {
            id: question.id,
            title: question.title.clone(),
            body: question.body.clone(),
            answer: None,
            answered: false,
            created_at: Utc::now(),
            answered_at: None,
        });
        Ok(())
    }

    async fn list(
        &self,
        request: PageRequest,
    ) -> Result<Page<Question>, QuestionPersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        let window: Vec<Question> = rows
            .iter()
            .skip(request.offset() as usize)
            .take(request.probe_limit() as usize)
            .cloned()
            .collect();
        Ok(Page::from_probe(window, request))
    }

    async fn find(&self, id: QuestionId) -> Result<Option<Question>, QuestionPersistenceError> {
        Ok(self.get(id))
    }

    async fn store_answer(
        &self,
        id: QuestionId,
        answer: &backend::domain::AnswerBody,
    ) -> Result<(), QuestionPersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let question = rows
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(QuestionPersistenceError::not_found)?;
        question.answer = Some(answer.clone());
        question.answered = true;
        if question.answered_at.is_none() {
            question.answered_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// Always-healthy store probe.
pub struct HealthyStore;

#[async_trait]
impl StoreHealth for HealthyStore {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        Ok(())
    }
}

/// Store probe that fails with a fixed message.
pub struct DownStore(pub &'static str);

#[async_trait]
impl StoreHealth for DownStore {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        Err(StoreHealthError::unavailable(self.0))
    }
}

/// The in-memory stores behind a test application, kept around so tests can
/// assert on stored rows directly.
pub struct TestEnv {
    pub users: Arc<InMemoryUsers>,
    pub posts: Arc<InMemoryPosts>,
    pub questions: Arc<InMemoryQuestions>,
    pub state: web::Data<HttpState>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_health(Arc::new(HealthyStore))
    }

    pub fn with_health(health: Arc<dyn StoreHealth>) -> Self {
        let users = Arc::new(InMemoryUsers::default());
        let posts = Arc::new(InMemoryPosts::new(Arc::clone(&users)));
        let questions = Arc::new(InMemoryQuestions::default());
        let accounts = AccountService::new(
            Arc::clone(&users) as Arc<dyn UserRepository>,
            Arc::new(Argon2PasswordHasher),
        );
        let state = web::Data::new(HttpState::new(
            accounts,
            Arc::clone(&posts) as Arc<dyn PostRepository>,
            Arc::clone(&questions) as Arc<dyn QuestionRepository>,
            health,
        ));
        Self {
            users,
            posts,
            questions,
            state,
        }
    }
}

/// Cookie settings matching production apart from `Secure`, which must be
/// off for plain-HTTP test requests.
pub fn test_settings() -> AppSettings {
    AppSettings::new(Key::from(&[0u8; 64]), false)
}

/// Extract the session cookie from a response, if one was set.
pub fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}

/// POST a registration form.
pub async fn register<S>(app: &S, username: &str, email: &str, password: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/register")
        .set_form(vec![
            ("username", username),
            ("email", email),
            ("password", password),
            ("confirm", password),
        ])
        .to_request();
    test::call_service(app, request).await
}

/// POST a login form and return the response.
pub async fn login<S>(app: &S, email: &str, password: &str) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/login")
        .set_form(vec![("email", email), ("password", password)])
        .to_request();
    test::call_service(app, request).await
}

/// The `Location` header of a redirect response.
pub fn location(response: &ServiceResponse) -> String {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii header")
        .to_owned()
}

/// Read a response body as UTF-8 text.
pub async fn body_text(response: ServiceResponse) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
