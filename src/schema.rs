//! Request Body Schema Validation
//!
//! 요청 body를 선언적 필드 규칙 테이블로 검증.
//! 메시지 형식은 JSON Schema 검증기의 관례를 따름:
//!
//! ```text
//! instance requires property "publisher"
//! instance.pages is not of a type(s) integer
//! instance.amazon_url does not conform to the "uri" format
//! ```
//!
//! # Validation Order
//!
//! 1. body가 object인지 (아니면 즉시 종료)
//! 2. 필수 필드 존재 여부 (테이블 순서)
//! 3. 필드별 타입 → 포맷 (타입이 맞을 때만 포맷 검사)
//!
//! 선언되지 않은 필드는 무시함.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

/// 필드 값의 JSON 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// 소수부가 0인 숫자 (`264`, `264.0`, `2e3` 모두 허용)
    Integer,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => {
                value.is_i64()
                    || value.is_u64()
                    || value.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
            }
        }
    }
}

/// 문자열 포맷 제약
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// scheme ":" 뒤에 공백 없는 나머지
    Uri,
}

impl FieldFormat {
    pub fn name(&self) -> &'static str {
        match self {
            FieldFormat::Uri => "uri",
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Uri => uri_regex().is_match(value),
        }
    }
}

fn uri_regex() -> &'static Regex {
    static URI: OnceLock<Regex> = OnceLock::new();
    URI.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:[^\s]*$").expect("uri pattern is a valid regex")
    })
}

/// 필드 하나에 대한 제약
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub format: Option<FieldFormat>,
}

impl FieldRule {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: true,
            kind,
            format: None,
        }
    }

    const fn with_format(self, format: FieldFormat) -> Self {
        Self {
            format: Some(format),
            ..self
        }
    }
}

/// 고정된 필드 규칙 테이블
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    rules: &'static [FieldRule],
}

/// 도서 생성/수정 공용 스키마
pub const BOOK_SCHEMA: Schema = Schema {
    rules: &[
        FieldRule::required("isbn", FieldKind::String),
        FieldRule::required("amazon_url", FieldKind::String).with_format(FieldFormat::Uri),
        FieldRule::required("author", FieldKind::String),
        FieldRule::required("language", FieldKind::String),
        FieldRule::required("pages", FieldKind::Integer),
        FieldRule::required("publisher", FieldKind::String),
        FieldRule::required("title", FieldKind::String),
        FieldRule::required("year", FieldKind::Integer),
    ],
};

impl Schema {
    /// `instance`를 검증하고 그대로 돌려줌
    ///
    /// # Errors
    ///
    /// 위반 메시지 목록 (비어 있지 않음, 검증 순서대로)
    pub fn validate<'a>(&self, instance: &'a Value) -> Result<&'a Value, Vec<String>> {
        let Some(obj) = instance.as_object() else {
            return Err(vec!["instance is not of a type(s) object".to_string()]);
        };

        let mut errors = self.missing_properties(obj);

        for rule in self.rules {
            if let Some(value) = obj.get(rule.name) {
                if let Some(message) = check_value(rule, value) {
                    errors.push(message);
                }
            }
        }

        if errors.is_empty() {
            Ok(instance)
        } else {
            Err(errors)
        }
    }

    /// 정수 필드에 float 표기(`264.0`)로 들어온 값을 정수 값으로 바꿈
    ///
    /// i64 범위를 벗어난 값은 그대로 둠 (이후 타입 변환에서 거부됨)
    pub fn normalize_integers(&self, instance: &mut Value) {
        let Some(obj) = instance.as_object_mut() else {
            return;
        };

        for rule in self.rules.iter().filter(|rule| rule.kind == FieldKind::Integer) {
            let Some(value) = obj.get_mut(rule.name) else {
                continue;
            };
            if !value.is_f64() {
                continue;
            }
            if let Some(f) = value.as_f64() {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                    *value = Value::from(f as i64);
                }
            }
        }
    }

    fn missing_properties(&self, obj: &Map<String, Value>) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.required && !obj.contains_key(rule.name))
            .map(|rule| format!("instance requires property \"{}\"", rule.name))
            .collect()
    }
}

fn check_value(rule: &FieldRule, value: &Value) -> Option<String> {
    if !rule.kind.matches(value) {
        return Some(format!(
            "instance.{} is not of a type(s) {}",
            rule.name,
            rule.kind.type_name()
        ));
    }

    match (rule.format, value.as_str()) {
        (Some(format), Some(s)) if !format.matches(s) => Some(format!(
            "instance.{} does not conform to the \"{}\" format",
            rule.name,
            format.name()
        )),
        _ => None,
    }
}
