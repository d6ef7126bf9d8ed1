//! 메트릭 클라이언트 (소스).
//!
//! 등록된 sink 목록을 `parking_lot::Mutex`로 보호하며,
//! 방출된 레코드를 등록 순서대로 각 sink에 전달한다.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tally_core::error::SourceError;
use tally_core::models::metric::MetricRecord;
use tally_core::ports::source::{MetricSink, MetricSource, SubscriptionId};
use tracing::{debug, info, warn};

use crate::instruments::{Counter, Histogram, MetricOptions};

/// 인메모리 메트릭 클라이언트
///
/// 복제본은 같은 sink 목록을 공유한다.
#[derive(Debug, Clone, Default)]
pub struct MetricsClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug, Default)]
struct ClientInner {
    /// 레코드에 기록할 소스 이름
    source_name: Option<String>,
    state: Mutex<ClientState>,
}

#[derive(Debug, Default)]
struct ClientState {
    sinks: Vec<(SubscriptionId, MetricSink)>,
    next_id: u64,
    /// close/fail 이후 true — 더 이상 방출하지 않음
    closed: bool,
}

impl MetricsClient {
    /// 새 클라이언트 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 방출 레코드의 `source` 필드를 채우는 클라이언트 생성
    pub fn with_source_name(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                source_name: Some(name.into()),
                state: Mutex::new(ClientState::default()),
            }),
        }
    }

    /// 카운터 계측기 생성
    pub fn counter(&self, options: MetricOptions) -> Counter {
        Counter::new(self.clone(), options)
    }

    /// 히스토그램 계측기 생성
    pub fn histogram(&self, options: MetricOptions) -> Histogram {
        Histogram::new(self.clone(), options)
    }

    /// 레코드 방출 — 도달한 sink 수 반환
    ///
    /// 시각/소스 이름이 비어 있으면 채운다. 수신 측이 사라진 sink는 제거한다.
    pub fn push(&self, mut record: MetricRecord) -> usize {
        if record.timestamp.is_none() {
            record.timestamp = Some(Utc::now());
        }
        if record.source.is_none() {
            record.source = self.inner.source_name.clone();
        }

        let mut state = self.inner.state.lock();
        if state.closed {
            debug!("종료된 클라이언트에 방출 무시: {}", record.name);
            return 0;
        }

        let mut delivered = 0;
        state.sinks.retain(|(id, sink)| {
            if sink.emit(record.clone()) {
                delivered += 1;
                true
            } else {
                debug!("수신 측 없는 sink 제거: {id}");
                false
            }
        });
        delivered
    }

    /// 에러 종료 — 모든 sink에 에러 전달 후 닫음
    pub fn fail(&self, error: SourceError) {
        let mut state = self.inner.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        warn!("메트릭 소스 에러 종료: {}", error.message);
        for (_, sink) in state.sinks.drain(..) {
            sink.fail(error.clone());
        }
    }

    /// 종료 여부
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// 현재 등록된 sink 수
    pub fn sink_count(&self) -> usize {
        self.inner.state.lock().sinks.len()
    }
}

impl MetricSource for MetricsClient {
    /// 이미 종료된 클라이언트에 등록하면 즉시 `End`를 받는다
    fn pipe(&self, sink: MetricSink) -> SubscriptionId {
        let mut state = self.inner.state.lock();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;

        if state.closed {
            debug!("종료된 클라이언트에 sink 등록: {id}");
            sink.end();
        } else {
            debug!("sink 등록: {id}");
            state.sinks.push((id, sink));
        }
        id
    }

    fn unpipe(&self, id: SubscriptionId) -> bool {
        let mut state = self.inner.state.lock();
        let before = state.sinks.len();
        state.sinks.retain(|(sink_id, _)| *sink_id != id);
        let removed = state.sinks.len() != before;
        if removed {
            debug!("sink 해제: {id}");
        }
        removed
    }

    fn close(&self) {
        let mut state = self.inner.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        info!("메트릭 소스 종료: sink {}개", state.sinks.len());
        for (_, sink) in state.sinks.drain(..) {
            sink.end();
        }
    }
}
