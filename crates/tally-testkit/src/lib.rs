//! # tally-testkit
//!
//! 메트릭 테스트 지원 도구.
//! 테스트 대상 코드가 방출한 메트릭을 수집하여, 수집 종료 후 검증할 수 있게 한다.
//!
//! ## 구조
//!
//! - [`consumer`] — 소스(push) → 결과 future(pull) 어댑터 ([`TestConsumer`])
//! - [`create_metric`] — 결정적 픽스처 레코드 빌더 (counter/timer)
//! - [`error`] — 컨슈머 에러 타입 (thiserror)
//!
//! ## 사용 예
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tally_testkit::TestConsumer;
//! # use tally_core::ports::source::MetricSource;
//! # async fn run(metrics: Arc<dyn MetricSource>) -> Result<(), tally_testkit::ConsumerError> {
//! let mut consumer = TestConsumer::new(metrics);
//! consumer.start();
//!
//! // 메트릭을 방출하는 코드 실행
//!
//! consumer.stop()?;
//! let records = consumer.get_results().await?;
//! assert!(records.iter().all(|r| !r.name.is_empty()));
//! # Ok(())
//! # }
//! ```

use tracing_subscriber::EnvFilter;

pub mod consumer;
pub mod create_metric;
pub mod error;

pub use consumer::{Collection, TestConsumer};
pub use error::ConsumerError;

/// 테스트용 tracing 초기화
///
/// `RUST_LOG`가 없으면 `warn` 레벨. 여러 테스트에서 반복 호출해도 된다.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
