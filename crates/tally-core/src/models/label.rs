//! 메트릭 레이블 모델.
//!
//! 레이블 순서는 방출/생성된 그대로 보존하며, 같은 이름의 중복도 제거하지 않는다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 레이블 값 — 문자열 또는 숫자
///
/// JSON에서는 태그 없이 원시 값으로 표현된다 (`"GET"`, `204`, `0.5`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    /// 문자열 값
    Text(String),
    /// 정수 값 (예: HTTP 상태 코드)
    Int(i64),
    /// 실수 값
    Float(f64),
}

impl LabelValue {
    /// 값이 "참"으로 취급되는지 여부
    ///
    /// 빈 문자열, 0, NaN은 거짓이다. 픽스처 빌더가 레이블 포함 여부를 판단할 때 사용.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
        }
    }

    /// 문자열 값이면 참조 반환
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LabelValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for LabelValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u16> for LabelValue {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for LabelValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for LabelValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// 이름/값 쌍 레이블
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// 레이블 이름 (예: "method", "status")
    pub name: String,
    /// 레이블 값
    pub value: LabelValue,
}

impl Label {
    /// 새 레이블 생성
    pub fn new(name: impl Into<String>, value: impl Into<LabelValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<K, V> From<(K, V)> for Label
where
    K: Into<String>,
    V: Into<LabelValue>,
{
    fn from((name, value): (K, V)) -> Self {
        Self::new(name, value)
    }
}
