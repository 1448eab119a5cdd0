//! Configuration Module
//!
//! # Interview Q&A
//!
//! Q: 테스트 DB와 운영 DB는 어떻게 분리하는가?
//! A: `ENVIRONMENT=test` 플래그로 연결 문자열 선택
//!    - test: `TEST_DATABASE_URL` (기본값: postgresql:///books-test)
//!    - 그 외: `DATABASE_URL` (기본값: postgresql:///books)
//!    - 통합 테스트가 운영 데이터를 지우는 사고 방지
//!
//! Q: 환경변수를 직접 읽지 않고 lookup 함수를 받는 이유는?
//! A: 테스트에서 프로세스 환경을 건드리지 않기 위해
//!    - `std::env::set_var`는 병렬 테스트 간 경쟁 상태 유발
//!    - `from_lookup`에 HashMap을 넘기면 결정적 테스트 가능

use std::env;
use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "postgresql:///books";
const DEFAULT_TEST_DATABASE_URL: &str = "postgresql:///books-test";
const DEFAULT_SECRET_KEY: &str = "secret";

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트 (기본값: 3000)
    pub port: u16,

    /// PostgreSQL 연결 문자열 (환경에 따라 선택됨)
    pub database_url: String,

    /// 예약된 비밀 키 (현재 라우트에서는 사용하지 않음)
    pub secret_key: String,

    /// 프로덕션 CORS 허용 도메인
    pub allowed_origins: Vec<String>,

    /// 환경 (development, test, production)
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "production" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    ///
    /// # Environment Variables
    ///
    /// - `ENVIRONMENT`: development | test | production
    /// - `DATABASE_URL`: PostgreSQL 연결 문자열 (test 외)
    /// - `TEST_DATABASE_URL`: PostgreSQL 연결 문자열 (test)
    /// - `SECRET_KEY`: 예약됨
    /// - `PORT`: 서버 포트 (기본값: 3000)
    /// - `ALLOWED_ORIGINS`: 쉼표 구분 도메인 목록 (production에서만 사용)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 key → value 조회 함수로 설정 구성
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(
            &lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        );

        let database_url = match environment {
            Environment::Test => lookup("TEST_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_TEST_DATABASE_URL.to_string()),
            _ => lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            port,
            database_url,
            secret_key: lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            allowed_origins,
            environment,
        })
    }

    /// 프로덕션 환경인지 확인
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// 테스트 환경인지 확인
    pub fn is_test(&self) -> bool {
        self.environment == Environment::Test
    }
}
