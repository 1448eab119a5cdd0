//! Repository Pattern Implementation
//!
//! # Interview Q&A
//!
//! Q: 왜 핸들러가 `Database`가 아니라 trait에 의존하는가?
//! A: 데이터 접근 로직을 추상화하기 위해
//!
//!    - 핸들러는 `Arc<dyn BookRepository>`만 앎
//!    - 운영: PostgreSQL 구현 (db/mod.rs의 `Database`)
//!    - 테스트: 메모리 Mock 구현 (DB 없이 라우트 전체 검증)
//!
//! Q: NotFound를 `Option`이 아니라 에러로 돌려주는 이유는?
//! A: get/update/remove 모두 "없음"이 동일한 404로 매핑됨
//!    - 라우트마다 `None` 분기를 반복하지 않음
//!    - `?` 한 번으로 `ApiError::NotFound`까지 전파

use async_trait::async_trait;

use super::models::Book;
use super::DbResult;

/// Book Repository 인터페이스
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 전체 도서 (title 오름차순)
    async fn list_all(&self) -> DbResult<Vec<Book>>;

    async fn get_by_isbn(&self, isbn: &str) -> DbResult<Book>;

    /// 삽입된 레코드 반환. 중복 isbn은 DB 제약 위반으로 실패
    async fn create(&self, book: &Book) -> DbResult<Book>;

    /// `isbn` 행의 나머지 7개 필드를 `book` 값으로 교체
    async fn update(&self, isbn: &str, book: &Book) -> DbResult<Book>;

    async fn remove(&self, isbn: &str) -> DbResult<()>;

    /// Health check용 왕복 쿼리
    async fn ping(&self) -> DbResult<()>;
}

// PostgreSQL 구현은 db/mod.rs의 Database 구조체에 있음
// 테스트용 Mock 구현:

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::db::DbError;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Default)]
    pub struct MockBookRepository {
        books: RwLock<HashMap<String, Book>>,
    }

    impl MockBookRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
            let repo = Self::new();
            {
                let mut map = repo.books.write().unwrap();
                for book in books {
                    map.insert(book.isbn.clone(), book);
                }
            }
            repo
        }

        pub fn len(&self) -> usize {
            self.books.read().unwrap().len()
        }
    }

    #[async_trait]
    impl BookRepository for MockBookRepository {
        async fn list_all(&self) -> DbResult<Vec<Book>> {
            let books = self.books.read().unwrap();
            let mut all: Vec<Book> = books.values().cloned().collect();
            all.sort_by(|a, b| a.title.cmp(&b.title));
            Ok(all)
        }

        async fn get_by_isbn(&self, isbn: &str) -> DbResult<Book> {
            let books = self.books.read().unwrap();
            books.get(isbn).cloned().ok_or_else(|| DbError::not_found(isbn))
        }

        async fn create(&self, book: &Book) -> DbResult<Book> {
            let mut books = self.books.write().unwrap();
            if books.contains_key(&book.isbn) {
                // PostgreSQL의 unique 위반과 동일하게 일반 실패로 취급
                return Err(DbError::Sqlx(sqlx::Error::Protocol(format!(
                    "duplicate key value violates unique constraint \"books_pkey\" ({})",
                    book.isbn
                ))));
            }
            books.insert(book.isbn.clone(), book.clone());
            Ok(book.clone())
        }

        async fn update(&self, isbn: &str, book: &Book) -> DbResult<Book> {
            let mut books = self.books.write().unwrap();
            let slot = books.get_mut(isbn).ok_or_else(|| DbError::not_found(isbn))?;
            *slot = book.clone().with_isbn(isbn);
            Ok(slot.clone())
        }

        async fn remove(&self, isbn: &str) -> DbResult<()> {
            let mut books = self.books.write().unwrap();
            books
                .remove(isbn)
                .map(|_| ())
                .ok_or_else(|| DbError::not_found(isbn))
        }

        async fn ping(&self) -> DbResult<()> {
            Ok(())
        }
    }

    mod tests {
        use super::*;
        use tokio_test::{assert_err, assert_ok};

        fn book(isbn: &str, title: &str) -> Book {
            Book {
                isbn: isbn.to_string(),
                amazon_url: "http://a.co/eobPtX2".to_string(),
                author: "Matthew Lane".to_string(),
                language: "english".to_string(),
                pages: 264,
                publisher: "Princeton University Press".to_string(),
                title: title.to_string(),
                year: 2017,
            }
        }

        #[tokio::test]
        async fn test_list_is_sorted_by_title() {
            let repo = MockBookRepository::with_books([
                book("2", "Zebra"),
                book("1", "Aardvark"),
                book("3", "Mongoose"),
            ]);

            let titles: Vec<String> = repo
                .list_all()
                .await
                .unwrap()
                .into_iter()
                .map(|b| b.title)
                .collect();
            assert_eq!(titles, vec!["Aardvark", "Mongoose", "Zebra"]);
        }

        #[tokio::test]
        async fn test_duplicate_create_fails() {
            let repo = MockBookRepository::with_books([book("1", "A")]);
            let err = assert_err!(repo.create(&book("1", "B")).await);
            assert!(!err.is_not_found());
            assert_eq!(repo.len(), 1);
        }

        #[tokio::test]
        async fn test_update_keeps_key() {
            let repo = MockBookRepository::with_books([book("1", "A")]);
            let updated = assert_ok!(repo.update("1", &book("other", "B")).await);
            assert_eq!(updated.isbn, "1");
            assert_eq!(updated.title, "B");
            assert!(repo.get_by_isbn("other").await.unwrap_err().is_not_found());
        }

        #[tokio::test]
        async fn test_remove_missing_is_not_found() {
            let repo = MockBookRepository::new();
            assert!(repo.remove("nope").await.unwrap_err().is_not_found());
        }
    }
}
