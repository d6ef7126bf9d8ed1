//! 픽스처 메트릭 레코드 빌더.
//!
//! 실제 소스 없이 형태가 맞는 결정적 레코드를 만든다.
//! 레이블은 고정 순서(method → type → uri → status)로, 값이 참인 것만 추가한다.

use tally_core::models::label::{Label, LabelValue};
use tally_core::models::metric::{MetricKind, MetricRecord};

/// HTTP 요청 카운터 이름
pub const COUNTER_NAME: &str = "http_requests_total";

/// HTTP 요청 지연 타이머 이름
pub const TIMER_NAME: &str = "http_request_duration_seconds";

/// `method` 기본값
pub const DEFAULT_METHOD: &str = "GET";

/// `status` 기본값
pub const DEFAULT_STATUS: i64 = 204;

/// `counter`/`timer` 옵션
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateMetricOptions {
    pub uri: Option<String>,
    /// 생략 시 "GET"
    pub method: Option<String>,
    /// 생략 시 204
    pub status: Option<LabelValue>,
    /// `type` 레이블. 생략 시 레이블 자체가 없음
    pub type_label: Option<LabelValue>,
}

impl CreateMetricOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn status(mut self, status: impl Into<LabelValue>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn type_label(mut self, value: impl Into<LabelValue>) -> Self {
        self.type_label = Some(value.into());
        self
    }
}

/// `base` 옵션 — 이름/종류 + 레이블 소스 값
#[derive(Debug, Clone, PartialEq)]
pub struct BaseOptions {
    pub name: String,
    pub kind: MetricKind,
    pub labels: CreateMetricOptions,
}

impl BaseOptions {
    /// 카운터 종류, 레이블 옵션 없음
    pub fn new(name: impl Into<String>) -> Self {
        Self::named(name, MetricKind::Counter, CreateMetricOptions::default())
    }

    pub fn named(name: impl Into<String>, kind: MetricKind, labels: CreateMetricOptions) -> Self {
        Self {
            name: name.into(),
            kind,
            labels,
        }
    }

    pub fn with_labels(mut self, labels: CreateMetricOptions) -> Self {
        self.labels = labels;
        self
    }
}

/// HTTP 요청 카운터 형태의 레코드
pub fn counter(options: CreateMetricOptions) -> MetricRecord {
    base(BaseOptions::named(COUNTER_NAME, MetricKind::Counter, options))
}

/// HTTP 요청 지연 타이머 형태의 레코드
pub fn timer(options: CreateMetricOptions) -> MetricRecord {
    base(BaseOptions::named(TIMER_NAME, MetricKind::Histogram, options))
}

/// 공통 빌더 — 실패하지 않는 순수 함수
pub fn base(options: BaseOptions) -> MetricRecord {
    let BaseOptions { name, kind, labels } = options;
    let method = labels
        .method
        .map(LabelValue::Text)
        .unwrap_or_else(|| LabelValue::from(DEFAULT_METHOD));
    let status = labels.status.unwrap_or(LabelValue::Int(DEFAULT_STATUS));

    let mut out = Vec::with_capacity(4);
    append_if_truthy(&mut out, "method", Some(method));
    append_if_truthy(&mut out, "type", labels.type_label);
    append_if_truthy(&mut out, "uri", labels.uri.map(LabelValue::Text));
    append_if_truthy(&mut out, "status", Some(status));

    MetricRecord::new(name, kind).with_labels(out)
}

fn append_if_truthy(labels: &mut Vec<Label>, name: &str, value: Option<LabelValue>) {
    if let Some(value) = value.filter(LabelValue::is_truthy) {
        labels.push(Label::new(name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(record: &MetricRecord) -> Vec<(String, String)> {
        record
            .labels
            .iter()
            .map(|l| (l.name.clone(), l.value.to_string()))
            .collect()
    }

    #[test]
    fn counter_and_timer_names() {
        assert_eq!(counter(CreateMetricOptions::new().uri("/a")).name, COUNTER_NAME);
        assert_eq!(timer(CreateMetricOptions::new().uri("/a")).name, TIMER_NAME);
        assert_eq!(timer(CreateMetricOptions::new()).kind, MetricKind::Histogram);
    }

    #[test]
    fn base_orders_supplied_labels() {
        let record = base(BaseOptions::new("x").with_labels(
            CreateMetricOptions::new().method("POST").uri("/y").status(500),
        ));

        assert_eq!(record.name, "x");
        assert_eq!(
            record.labels,
            vec![
                Label::new("method", "POST"),
                Label::new("uri", "/y"),
                Label::new("status", 500),
            ]
        );
    }

    #[test]
    fn base_fills_defaults() {
        let record = base(BaseOptions::new("x"));
        assert_eq!(
            record.labels,
            vec![Label::new("method", "GET"), Label::new("status", 204)]
        );
    }

    #[test]
    fn type_label_sits_after_method_when_supplied() {
        let record = counter(
            CreateMetricOptions::new()
                .uri("/lol")
                .type_label("some_label"),
        );
        assert_eq!(
            pairs(&record),
            [
                ("method", "GET"),
                ("type", "some_label"),
                ("uri", "/lol"),
                ("status", "204"),
            ]
            .map(|(n, v)| (n.to_string(), v.to_string()))
        );
    }

    #[test]
    fn type_label_absent_when_omitted() {
        let record = counter(CreateMetricOptions::new().uri("/lol"));
        assert!(record.label("type").is_none());
        assert_eq!(record.labels.len(), 3);
    }

    #[test]
    fn falsy_values_are_skipped() {
        let record = timer(
            CreateMetricOptions::new()
                .method("")
                .uri("")
                .status(0)
                .type_label(""),
        );
        assert!(record.labels.is_empty());
    }

    #[test]
    fn string_status_is_kept_verbatim() {
        let record = counter(CreateMetricOptions::new().status("2xx"));
        assert_eq!(record.label("status").and_then(|v| v.as_str()), Some("2xx"));
    }

    #[test]
    fn identical_options_produce_equal_records() {
        let options = CreateMetricOptions::new().uri("/same").method("PUT");
        assert_eq!(counter(options.clone()), counter(options));
    }
}
