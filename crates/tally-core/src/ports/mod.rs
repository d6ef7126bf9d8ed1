//! 포트 인터페이스 (trait).
//!
//! 메트릭 소스 어댑터가 [`source::MetricSource`]를 구현하며,
//! `tally-testkit`에서 `Arc<dyn MetricSource>`로 와이어링한다.

pub mod source;
