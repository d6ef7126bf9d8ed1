//! 계측기 — 카운터, 히스토그램, 타이머.
//!
//! 계측기는 클라이언트 복제본을 보유하고, 호출마다 레코드 하나를 방출한다.

use std::time::Instant;

use tally_core::models::label::Label;
use tally_core::models::metric::{MetricKind, MetricRecord};

use crate::client::MetricsClient;

/// 계측기 생성 옵션
#[derive(Debug, Clone, Default)]
pub struct MetricOptions {
    /// 메트릭 이름
    pub name: String,
    /// 설명
    pub description: String,
}

impl MetricOptions {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// 카운터 계측기
#[derive(Debug, Clone)]
pub struct Counter {
    client: MetricsClient,
    options: MetricOptions,
}

impl Counter {
    pub(crate) fn new(client: MetricsClient, options: MetricOptions) -> Self {
        Self { client, options }
    }

    /// 레이블 없이 증가
    pub fn inc(&self, value: f64) {
        self.inc_with_labels(value, std::iter::empty::<Label>());
    }

    /// 레이블과 함께 증가 — 방출 레코드의 `value`는 증가량
    pub fn inc_with_labels<L>(&self, value: f64, labels: impl IntoIterator<Item = L>)
    where
        L: Into<Label>,
    {
        let record = MetricRecord::new(&self.options.name, MetricKind::Counter)
            .with_description(&self.options.description)
            .with_value(value)
            .with_labels(labels.into_iter().map(Into::into));
        self.client.push(record);
    }
}

/// 히스토그램 계측기
#[derive(Debug, Clone)]
pub struct Histogram {
    client: MetricsClient,
    options: MetricOptions,
}

impl Histogram {
    pub(crate) fn new(client: MetricsClient, options: MetricOptions) -> Self {
        Self { client, options }
    }

    /// 관측값 기록
    pub fn observe<L>(&self, value: f64, labels: impl IntoIterator<Item = L>)
    where
        L: Into<Label>,
    {
        let record = MetricRecord::new(&self.options.name, MetricKind::Histogram)
            .with_description(&self.options.description)
            .with_value(value)
            .with_labels(labels.into_iter().map(Into::into));
        self.client.push(record);
    }

    /// 경과 시간 측정 시작
    pub fn timer(&self) -> Timer {
        Timer {
            histogram: self.clone(),
            started: Instant::now(),
        }
    }
}

/// 히스토그램 타이머 — `done` 호출 시 경과 초를 관측값으로 기록
#[derive(Debug)]
pub struct Timer {
    histogram: Histogram,
    started: Instant,
}

impl Timer {
    /// 측정 종료, 기록한 경과 초 반환
    pub fn done<L>(self, labels: impl IntoIterator<Item = L>) -> f64
    where
        L: Into<Label>,
    {
        let elapsed = self.started.elapsed().as_secs_f64();
        self.histogram.observe(elapsed, labels);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::models::label::LabelValue;
    use tally_core::ports::source::{MetricSink, MetricSource, SourceEvent};

    fn expect_record(event: Option<SourceEvent>) -> MetricRecord {
        match event {
            Some(SourceEvent::Record(record)) => record,
            other => panic!("레코드 이벤트 기대: {other:?}"),
        }
    }

    #[tokio::test]
    async fn counter_emits_increment_with_labels() {
        let client = MetricsClient::new();
        let (sink, mut rx) = MetricSink::channel();
        client.pipe(sink);

        let counter = client.counter(MetricOptions::new(
            "a_custom_counter_metric",
            "A custom metric",
        ));
        counter.inc_with_labels(2.0, [("type", "some_label")]);

        let record = expect_record(rx.recv().await);
        assert_eq!(record.name, "a_custom_counter_metric");
        assert_eq!(record.description, "A custom metric");
        assert_eq!(record.kind, MetricKind::Counter);
        assert_eq!(record.value, Some(2.0));
        assert_eq!(
            record.label("type"),
            Some(&LabelValue::Text("some_label".to_string()))
        );
    }

    #[tokio::test]
    async fn counter_inc_without_labels() {
        let client = MetricsClient::new();
        let (sink, mut rx) = MetricSink::channel();
        client.pipe(sink);

        client.counter(MetricOptions::new("plain", "")).inc(1.0);

        let record = expect_record(rx.recv().await);
        assert!(record.labels.is_empty());
        assert_eq!(record.value, Some(1.0));
    }

    #[tokio::test]
    async fn timer_observes_elapsed_seconds() {
        let client = MetricsClient::new();
        let (sink, mut rx) = MetricSink::channel();
        client.pipe(sink);

        let histogram = client.histogram(MetricOptions::new(
            "http_request_duration_seconds",
            "request latency",
        ));
        let elapsed = histogram.timer().done([("method", "GET")]);

        let record = expect_record(rx.recv().await);
        assert_eq!(record.kind, MetricKind::Histogram);
        assert_eq!(record.value, Some(elapsed));
        assert!(elapsed >= 0.0);
        assert_eq!(record.label("method").and_then(|v| v.as_str()), Some("GET"));
    }
}
