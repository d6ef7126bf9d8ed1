//! TALLY 도메인 모델.
//!
//! 메트릭 소스가 방출하는 레코드와 레이블을 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod label;
pub mod metric;
