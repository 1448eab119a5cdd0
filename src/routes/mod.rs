//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//! - `/health` - 헬스 체크
//! - `/books` - 도서 목록 / 생성
//! - `/books/:isbn` - 도서 조회 / 수정 / 삭제

pub mod books;
pub mod health;
