//! Board listing, posting, and pagination.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;

use backend::domain::ports::{PostRepository, UserRepository};
use backend::domain::{Email, NewPost, PostBody, PostId, PostTitle};
use backend::server::build_app;
use support::{body_text, location, login, register, session_cookie, test_settings, TestEnv};

#[actix_web::test]
async fn posting_redirects_then_the_post_is_listed() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;
    register(&app, "alice", "a@x.com", "p1-p1-p1").await;
    let response = login(&app, "a@x.com", "p1-p1-p1").await;
    let cookie = session_cookie(&response).expect("session cookie set");

    let request = test::TestRequest::post()
        .uri("/board")
        .cookie(cookie.clone())
        .set_form(vec![("title", "first post"), ("content", "hello board")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/board");
    assert_eq!(env.posts.count(), 1);

    let request = test::TestRequest::get()
        .uri("/board")
        .cookie(cookie)
        .to_request();
    let response = test::call_service(&app, request).await;
    let html = body_text(response).await;
    assert!(html.contains("first post"));
    assert!(html.contains("hello board"));
    assert!(html.contains("alice"));
}

#[actix_web::test]
async fn anonymous_post_submission_is_redirected_and_stores_nothing() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;

    let request = test::TestRequest::post()
        .uri("/board")
        .set_form(vec![("title", "sneaky"), ("content", "no login")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?next=%2Fboard");
    assert_eq!(env.posts.count(), 0);
}

#[actix_web::test]
async fn invalid_submission_rerenders_with_messages_and_draft() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;
    register(&app, "alice", "a@x.com", "p1-p1-p1").await;
    let response = login(&app, "a@x.com", "p1-p1-p1").await;
    let cookie = session_cookie(&response).expect("session cookie set");

    let request = test::TestRequest::post()
        .uri("/board")
        .cookie(cookie)
        .set_form(vec![("title", ""), ("content", "kept draft")])
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("title must not be empty"));
    assert!(html.contains("kept draft"));
    assert_eq!(env.posts.count(), 0);
}

#[actix_web::test]
async fn listings_are_paged_in_creation_order() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;
    register(&app, "alice", "a@x.com", "p1-p1-p1").await;
    let response = login(&app, "a@x.com", "p1-p1-p1").await;
    let cookie = session_cookie(&response).expect("session cookie set");

    let author = env
        .users
        .find_by_email(&Email::new("a@x.com").expect("valid email"))
        .await
        .expect("lookup runs")
        .expect("registered user")
        .id;
    for n in 0..21 {
        env.posts
            .insert(&NewPost {
                id: PostId::random(),
                title: PostTitle::new(format!("post number {n}")).expect("valid title"),
                body: PostBody::new("body").expect("valid body"),
                author,
            })
            .await
            .expect("insert succeeds");
    }

    let request = test::TestRequest::get()
        .uri("/board")
        .cookie(cookie.clone())
        .to_request();
    let html = body_text(test::call_service(&app, request).await).await;
    assert!(html.contains("post number 0"));
    assert!(!html.contains("post number 20"));
    assert!(html.contains("/board?page=2"));

    let request = test::TestRequest::get()
        .uri("/board?page=2")
        .cookie(cookie)
        .to_request();
    let html = body_text(test::call_service(&app, request).await).await;
    assert!(html.contains("post number 20"));
    assert!(html.contains("/board?page=1"));
    assert!(!html.contains("/board?page=3"));
}
