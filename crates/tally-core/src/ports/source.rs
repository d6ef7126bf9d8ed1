//! 메트릭 소스 포트.
//!
//! 구현: `tally-client` crate (인메모리 `MetricsClient`)
//!
//! 소스는 등록된 sink마다 [`SourceEvent`]를 순서대로 밀어 넣는다.
//! 수신 측은 `mpsc::UnboundedReceiver`로 당겨 읽는다.

use std::fmt;

use tokio::sync::mpsc;

use crate::error::SourceError;
use crate::models::metric::MetricRecord;

/// 소스 → sink 이벤트
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    /// 레코드 방출
    Record(MetricRecord),
    /// 정상 종료 (더 이상 레코드 없음)
    End,
    /// 에러 종료
    Error(SourceError),
}

/// 소스 구독 식별자 — `unpipe`에 사용
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// 소스에 등록되는 송신 측 핸들
///
/// 모든 전송 메서드는 수신 측이 사라졌으면 `false`를 반환한다.
#[derive(Debug, Clone)]
pub struct MetricSink {
    tx: mpsc::UnboundedSender<SourceEvent>,
}

impl MetricSink {
    /// sink와 짝이 되는 수신기 생성
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SourceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// 레코드 전달
    pub fn emit(&self, record: MetricRecord) -> bool {
        self.tx.send(SourceEvent::Record(record)).is_ok()
    }

    /// 정상 종료 신호
    pub fn end(&self) -> bool {
        self.tx.send(SourceEvent::End).is_ok()
    }

    /// 에러 종료 신호
    pub fn fail(&self, error: SourceError) -> bool {
        self.tx.send(SourceEvent::Error(error)).is_ok()
    }

    /// 수신 측이 닫혔는지 여부
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// 메트릭 방출 소스
///
/// 각 sink에는 방출 순서대로 레코드를 전달해야 하며,
/// `close` 이후에는 모든 sink에 [`SourceEvent::End`]를 보내야 한다.
pub trait MetricSource: Send + Sync {
    /// sink 등록 — 이후 방출되는 모든 레코드를 받는다
    fn pipe(&self, sink: MetricSink) -> SubscriptionId;

    /// sink 등록 해제. 등록된 구독이었으면 `true`
    fn unpipe(&self, id: SubscriptionId) -> bool;

    /// 더 이상 출력이 필요 없음을 알림 (스트림 종료)
    fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metric::MetricKind;

    #[tokio::test]
    async fn sink_delivers_events_in_order() {
        let (sink, mut rx) = MetricSink::channel();

        assert!(sink.emit(MetricRecord::new("a", MetricKind::Counter)));
        assert!(sink.emit(MetricRecord::new("b", MetricKind::Counter)));
        assert!(sink.end());

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(matches!(first, SourceEvent::Record(r) if r.name == "a"));
        assert!(matches!(second, SourceEvent::Record(r) if r.name == "b"));
        assert_eq!(rx.recv().await, Some(SourceEvent::End));
    }

    #[test]
    fn sink_reports_dropped_receiver() {
        let (sink, rx) = MetricSink::channel();
        assert!(!sink.is_closed());

        drop(rx);

        assert!(sink.is_closed());
        assert!(!sink.fail(SourceError::new("late")));
    }

    #[test]
    fn subscription_id_display() {
        assert_eq!(SubscriptionId(7).to_string(), "sub#7");
    }
}
