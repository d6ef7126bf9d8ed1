//! 컨슈머 에러 타입.

use tally_core::error::SourceError;
use thiserror::Error;

/// 테스트 컨슈머 에러
///
/// 공유 결과 future의 출력이므로 `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsumerError {
    /// `start` 전에 `stop`/`get_results` 호출
    #[error("활성 수집 세션 없음 — start()를 먼저 호출해야 함")]
    NoActiveSession,

    /// 소스가 보고한 에러 (그대로 전달)
    #[error(transparent)]
    Source(#[from] SourceError),

    /// 소스가 종료 신호 없이 sink를 버림
    #[error("메트릭 소스가 종료 신호 없이 사라짐")]
    SourceDropped,

    /// 결과 대기 타임아웃
    #[error("결과 대기 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 설정된 타임아웃 (밀리초)
        timeout_ms: u64,
    },
}
