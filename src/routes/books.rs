//! Book Endpoints
//!
//! CRUD over the `books` table. Write endpoints validate the body against
//! `BOOK_SCHEMA` before touching the database.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::{db::Book, error::ApiError, extract::JsonBody, schema::BOOK_SCHEMA, AppState};

// ============ Response Types ============

#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============ Handlers ============

/// GET /books
///
/// 전체 도서 (title 오름차순)
pub async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<BooksResponse>, ApiError> {
    let books = state.books.list_all().await?;
    Ok(Json(BooksResponse { books }))
}

/// POST /books
///
/// # Flow
///
/// 1. JSON 파싱 (실패 시 400, JSON이 아닌 body는 `{}`)
/// 2. 스키마 검증 (실패 시 400 + 메시지 배열)
/// 3. INSERT ... RETURNING
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = validated_book(body)?;

    let book = state.books.create(&book).await?;
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// GET /books/:isbn
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state.books.get_by_isbn(&isbn).await?;
    Ok(Json(BookResponse { book }))
}

/// PUT /books/:isbn
///
/// 검증이 존재 여부보다 먼저: 잘못된 body는 isbn과 무관하게 400
pub async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<BookResponse>, ApiError> {
    let book = validated_book(body)?;

    let book = state.books.update(&isbn, &book).await?;
    Ok(Json(BookResponse { book }))
}

/// DELETE /books/:isbn
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.books.remove(&isbn).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}

/// Unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

// ============ Helpers ============

fn validated_book(mut body: Value) -> Result<Book, ApiError> {
    BOOK_SCHEMA.validate(&body).map_err(|errors| {
        tracing::debug!(?errors, "book body rejected");
        ApiError::ValidationError(errors)
    })?;

    // 264.0 -> 264
    BOOK_SCHEMA.normalize_integers(&mut body);

    // 스키마는 통과했지만 i32 범위를 벗어난 정수
    serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}
