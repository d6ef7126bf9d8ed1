//! # tally-core
//!
//! TALLY 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 메트릭 레코드/레이블 (serde Serialize/Deserialize)
//! - [`ports`] — 메트릭 소스 포트 인터페이스 (sink 채널 + 구독 핸들)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 테스트 컨슈머 설정 구조체

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
