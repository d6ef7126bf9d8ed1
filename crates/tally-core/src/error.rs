//! TALLY 핵심 에러 타입.
//!
//! 상위 crate는 자체 에러 타입에서 `#[from] SourceError`로 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정 파일 로드 등 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

/// 메트릭 소스가 비정상 종료를 알릴 때 전달하는 에러.
///
/// 공유 future가 모든 핸들에 같은 결과를 돌려주므로 `Clone`이어야 한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("메트릭 소스 에러: {message}")]
pub struct SourceError {
    /// 소스가 보고한 메시지 (가공하지 않음)
    pub message: String,
}

impl SourceError {
    /// 새 소스 에러 생성
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_keeps_message_verbatim() {
        let err = SourceError::new("stream exploded");
        assert_eq!(err.message, "stream exploded");
        assert!(err.to_string().contains("stream exploded"));
    }

    #[test]
    fn core_error_from_serde() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: CoreError = serde_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
