//! Database Module
//!
//! # Interview Q&A
//!
//! Q: 전역 커넥션 하나를 공유하지 않고 풀을 쓰는 이유는?
//! A: 동시 요청 처리
//!
//!    - 단일 커넥션: 요청들이 한 소켓 위에서 직렬화됨
//!    - PgPool: 쿼리마다 커넥션을 빌리고 반납 (scoped acquire/release)
//!    - 풀 자체는 `AppState`를 통해 핸들러에 주입됨
//!
//! Q: SQL injection은 어떻게 막는가?
//! A: 모든 쿼리는 `$1..$n` 바인딩만 사용
//!
//!    ```rust,ignore
//!    sqlx::query_as::<_, Book>("SELECT ... FROM books WHERE isbn = $1")
//!        .bind(isbn)
//!    ```
//!
//!    문자열 보간으로 SQL을 만드는 곳은 없음
//!
//! Q: 중복 isbn은 어떻게 처리하는가?
//! A: 별도 처리 없음
//!    - PRIMARY KEY 제약 위반이 `DbError::Sqlx`로 올라감
//!    - 라우트에서는 500으로 응답 (구문 단위 원자성에 의존)

mod models;
mod repository;

pub use models::*;
pub use repository::BookRepository;
#[cfg(test)]
pub use repository::mock;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

/// 데이터 접근 계층 에러
#[derive(Debug, Error)]
pub enum DbError {
    /// 해당 isbn의 행이 없음 (조회 결과 없음, 또는 영향받은 행 0개)
    #[error("There is no book with an isbn '{isbn}'")]
    NotFound { isbn: String },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    pub fn not_found(isbn: &str) -> Self {
        DbError::NotFound {
            isbn: isbn.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

pub type DbResult<T> = Result<T, DbError>;

const BOOK_COLUMNS: &str =
    "isbn, amazon_url, author, language, pages, publisher, title, year";

/// 데이터베이스 연결 및 쿼리 담당
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 데이터베이스 연결
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 10 (트래픽에 따라 조정)
    /// - min_connections: 1 (idle 시 최소 유지)
    /// - acquire_timeout: 3초 (커넥션 획득 대기)
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 마이그레이션 실행
    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await?;
        Ok(())
    }

    /// 모든 도서 삭제 (통합 테스트 fixture 초기화)
    pub async fn truncate(&self) -> DbResult<()> {
        sqlx::query("DELETE FROM books")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BookRepository for Database {
    async fn list_all(&self) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY title"
        ))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = books.len(), "listed books");
        Ok(books)
    }

    async fn get_by_isbn(&self, isbn: &str) -> DbResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE isbn = $1"
        ))
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(isbn))
    }

    async fn create(&self, book: &Book) -> DbResult<Book> {
        let created = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books ({BOOK_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(isbn = %created.isbn, "book created");
        Ok(created)
    }

    async fn update(&self, isbn: &str, book: &Book) -> DbResult<Book> {
        let updated = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET amazon_url = $1,
                author = $2,
                language = $3,
                pages = $4,
                publisher = $5,
                title = $6,
                year = $7
            WHERE isbn = $8
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(isbn))?;

        tracing::info!(isbn = %updated.isbn, "book updated");
        Ok(updated)
    }

    async fn remove(&self, isbn: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(isbn));
        }

        tracing::info!(isbn, "book deleted");
        Ok(())
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
