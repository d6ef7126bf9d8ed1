//! 메트릭 레코드 모델.
//!
//! 소스가 방출하는 단일 관측값. 컨슈머는 `name`/`labels` 외 필드를 해석하지 않는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::label::{Label, LabelValue};

/// 메트릭 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// 단조 증가 카운터
    Counter,
    /// 임의 값 게이지
    Gauge,
    /// 버킷 기반 히스토그램 (타이머 포함)
    Histogram,
    /// 분위수 요약
    Summary,
}

/// 단일 메트릭 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// 메트릭 이름 (예: "http_requests_total")
    pub name: String,
    /// 설명
    #[serde(default)]
    pub description: String,
    /// 메트릭 종류
    #[serde(rename = "type")]
    pub kind: MetricKind,
    /// 측정값 (픽스처는 값 없음)
    #[serde(default)]
    pub value: Option<f64>,
    /// 레이블 (순서 보존)
    #[serde(default)]
    pub labels: Vec<Label>,
    /// 방출 시각 (픽스처는 None — 구조 비교 가능하도록)
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// 방출한 소스 이름
    #[serde(default)]
    pub source: Option<String>,
    /// 소스 정의 부가 정보
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl MetricRecord {
    /// 이름과 종류만 채운 레코드 생성
    pub fn new(name: impl Into<String>, kind: MetricKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            value: None,
            labels: Vec::new(),
            timestamp: None,
            source: None,
            meta: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// 레이블을 끝에 추가 (중복 이름도 그대로 추가)
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels.extend(labels);
        self
    }

    /// 이름이 일치하는 첫 번째 레이블 값
    pub fn label(&self, name: &str) -> Option<&LabelValue> {
        self.labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| &label.value)
    }
}
