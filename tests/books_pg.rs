//! PostgreSQL Integration Test
//!
//! 실제 DB에 대해 라우터 전체를 돌려보는 테스트.
//!
//! ## Running
//!
//! ```bash
//! createdb books-test
//! ENVIRONMENT=test TEST_DATABASE_URL=postgresql:///books-test \
//!     cargo test --test books_pg -- --ignored --nocapture
//! ```
//!
//! 테이블을 비우고 시작하므로 운영 DB를 가리키면 안 됨.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookstore_api::{create_router, AppState, BookRepository, Config, Database};

fn test_book() -> Value {
    json!({
        "isbn": "0691161518",
        "amazon_url": "http://a.co/eobPtX2",
        "author": "Matthew Lane",
        "language": "english",
        "pages": 264,
        "publisher": "Princeton University Press",
        "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
        "year": 2017
    })
}

async fn setup() -> (Arc<Database>, Router) {
    let config = Config::from_lookup(|key| match key {
        "ENVIRONMENT" => Some("test".to_string()),
        _ => std::env::var(key).ok(),
    })
    .expect("test config");
    assert!(config.is_test());

    let db = Database::connect(&config.database_url)
        .await
        .expect("TEST_DATABASE_URL must point at a reachable database");
    db.run_migrations().await.expect("migrations");
    db.truncate().await.expect("truncate");

    let db = Arc::new(db);
    let app = create_router(AppState::new(db.clone(), config));
    (db, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_book_lifecycle() {
    let (db, app) = setup().await;

    // 빈 테이블
    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "books": [] }));

    // 생성 → 조회
    let (status, body) = send(&app, Method::POST, "/books", Some(test_book())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["book"], test_book());

    let (status, body) = send(&app, Method::GET, "/books/0691161518", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["isbn"], "0691161518");
    assert_eq!(body["book"], test_book());

    // 중복 isbn은 일반 실패
    let (status, _) = send(&app, Method::POST, "/books", Some(test_book())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // title 정렬
    let mut second = test_book();
    second["isbn"] = json!("0123456789");
    second["title"] = json!("A Book Before Power-Up");
    let (status, _) = send(&app, Method::POST, "/books", Some(second)).await;
    assert_eq!(status, StatusCode::CREATED);

    let books = db.list_all().await.unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].isbn, "0123456789");

    // 수정
    let mut updated = test_book();
    updated["author"] = json!("Updated Author");
    let (status, body) = send(&app, Method::PUT, "/books/0691161518", Some(updated)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["author"], "Updated Author");

    let (status, body) = send(&app, Method::PUT, "/books/invalid-isbn", Some(test_book())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "There is no book with an isbn 'invalid-isbn'");

    // 삭제
    let (status, body) = send(&app, Method::DELETE, "/books/0691161518", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let (status, _) = send(&app, Method::GET, "/books/0691161518", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/books/0691161518", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    db.truncate().await.unwrap();
}
