//! Database Models
//!
//! Row types for the `books` table. The same struct is used as the JSON body
//! of responses, so field order here is the order clients see.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 도서 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// ISBN (primary key, 생성 후 변경 불가)
    pub isbn: String,

    /// Amazon 상품 URL (uri 포맷)
    pub amazon_url: String,

    pub author: String,

    pub language: String,

    /// 페이지 수
    pub pages: i32,

    pub publisher: String,

    pub title: String,

    /// 출판 연도
    pub year: i32,
}

impl Book {
    /// 같은 필드로 ISBN만 바꾼 사본
    ///
    /// PUT 요청에서는 body의 isbn이 아니라 경로의 isbn이 키가 됨
    pub fn with_isbn(mut self, isbn: &str) -> Self {
        self.isbn = isbn.to_string();
        self
    }
}
