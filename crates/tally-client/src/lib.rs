//! # tally-client
//!
//! 인메모리 메트릭 클라이언트.
//! 카운터/히스토그램 계측기가 만든 레코드를 등록된 모든 sink로 팬아웃하며,
//! `tally_core::ports::source::MetricSource`를 구현한다.
//! 집계, 백프레셔는 하지 않는다.

pub mod client;
pub mod instruments;

pub use client::MetricsClient;
pub use instruments::{Counter, Histogram, MetricOptions, Timer};
