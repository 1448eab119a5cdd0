//! Bookstore API Library
//!
//! # Overview
//!
//! 도서 카탈로그 REST API. `books` 테이블 하나에 대한 CRUD와
//! 요청 body 스키마 검증을 제공합니다.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                     API                       │
//! │                                               │
//! │  ┌─────────┐   ┌─────────┐   ┌─────────────┐  │
//! │  │ Routes  │──▶│ Schema  │   │ BookRepo    │  │
//! │  └────┬────┘   └─────────┘   └──────┬──────┘  │
//! │       └─────────────────────────────┘         │
//! └────────────────────────┬──────────────────────┘
//!                          ▼
//!                 ┌────────────────┐
//!                 │  PostgreSQL    │
//!                 └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 HTTP 응답 변환
//! - `extract`: 쓰기 요청 body 추출
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `schema`: 요청 body 검증
//! - `db`: 데이터베이스 연동
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_api::{config::Config, db::Database, AppState, create_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url).await?;
//!     let app = create_router(AppState::new(std::sync::Arc::new(db), config));
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod routes;
pub mod schema;

// Re-exports for convenience
pub use config::Config;
pub use db::{BookRepository, Database};
pub use error::ApiError;

/// 애플리케이션 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(books: Arc<dyn BookRepository>, config: Config) -> Self {
        Self {
            books,
            config: Arc::new(config),
        }
    }
}

/// 라우터 생성
///
/// # Route Structure
///
/// ```text
/// GET    /health        - 서버 상태 확인
///
/// GET    /books         - 도서 목록 (title 순)
/// POST   /books         - 도서 생성
/// GET    /books/:isbn   - 도서 조회
/// PUT    /books/:isbn   - 도서 수정
/// DELETE /books/:isbn   - 도서 삭제
/// ```
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))

        // Books
        .route(
            "/books",
            get(routes::books::list_books).post(routes::books::create_book),
        )
        .route(
            "/books/:isbn",
            get(routes::books::get_book)
                .put(routes::books::update_book)
                .delete(routes::books::delete_book),
        )
        .fallback(routes::books::not_found)

        // 미들웨어
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // 상태 주입
        .with_state(state)
}

/// CORS 설정
///
/// 프로덕션: `ALLOWED_ORIGINS` (쉼표 구분) 도메인만 허용
/// 그 외: 모두 허용
fn cors_layer(config: &Config) -> CorsLayer {
    if config.is_production() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
