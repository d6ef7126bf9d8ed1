//! 테스트 컨슈머.
//!
//! 소스 push → sink 채널 → 공유 결과 future(pull).
//! 채널이 곧 버퍼이며, 결과 future가 await될 때 방출 순서대로 비운다.
//! 별도 태스크를 띄우지 않는다.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt, Shared};
use tally_core::config::ConsumerConfig;
use tally_core::models::metric::MetricRecord;
use tally_core::ports::source::{MetricSink, MetricSource, SourceEvent, SubscriptionId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::ConsumerError;

/// 한 세션의 수집 결과
pub type CollectionOutcome = Result<Vec<MetricRecord>, ConsumerError>;

/// 세션 완료 future
///
/// 단일 결과를 공유하며, 모든 복제본이 같은 결과를 받는다.
/// `stop()`의 반환값이자 `get_results()`의 기반.
#[derive(Clone)]
pub struct Collection {
    inner: Shared<BoxFuture<'static, CollectionOutcome>>,
}

impl Collection {
    /// 수신기를 비우는 future 생성 (await 전에는 아무것도 하지 않음)
    fn drain(mut rx: mpsc::UnboundedReceiver<SourceEvent>) -> Self {
        let fut = async move {
            let mut records = Vec::new();
            while let Some(event) = rx.recv().await {
                match event {
                    SourceEvent::Record(record) => records.push(record),
                    SourceEvent::End => {
                        debug!("수집 세션 종료: 레코드 {}개", records.len());
                        return Ok(records);
                    }
                    SourceEvent::Error(error) => {
                        warn!(
                            "수집 세션 에러 종료 (버퍼 {}개 폐기): {}",
                            records.len(),
                            error.message
                        );
                        return Err(ConsumerError::Source(error));
                    }
                }
            }
            Err(ConsumerError::SourceDropped)
        };

        Self {
            inner: fut.boxed().shared(),
        }
    }

    /// 같은 세션의 핸들인지 여부
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    /// 완료된 경우 결과 참조
    pub fn peek(&self) -> Option<&CollectionOutcome> {
        self.inner.peek()
    }

    pub fn is_finished(&self) -> bool {
        self.peek().is_some()
    }
}

impl Future for Collection {
    type Output = CollectionOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

/// 테스트 컨슈머 — 메트릭 소스를 구독해 방출 레코드를 수집
///
/// ```text
/// start() → (테스트 대상 코드 실행) → stop() → get_results().await
/// ```
pub struct TestConsumer {
    source: Arc<dyn MetricSource>,
    config: ConsumerConfig,
    /// 현재 세션 (가장 최근 start)
    session: Option<Collection>,
    /// 이 컨슈머가 등록한 모든 구독
    subscriptions: Vec<SubscriptionId>,
}

impl TestConsumer {
    /// 기본 설정으로 생성
    pub fn new(source: Arc<dyn MetricSource>) -> Self {
        Self::with_config(source, ConsumerConfig::default_config())
    }

    /// 지정 설정으로 생성
    pub fn with_config(source: Arc<dyn MetricSource>, config: ConsumerConfig) -> Self {
        Self {
            source,
            config,
            session: None,
            subscriptions: Vec::new(),
        }
    }

    /// 새 수집 세션 시작
    ///
    /// 호출할 때마다 sink가 하나씩 더 등록된다.
    /// `stop`/`get_results`로는 가장 최근 세션만 접근할 수 있다.
    pub fn start(&mut self) {
        let (sink, rx) = MetricSink::channel();
        let collection = Collection::drain(rx);
        let id = self.source.pipe(sink);
        self.subscriptions.push(id);

        if self.session.replace(collection).is_some() {
            debug!("이전 수집 세션 대체: {id}");
        }
        info!("수집 세션 시작: {id}");
    }

    /// 소스에 종료 신호를 보내고 현재 세션의 완료 future 반환
    pub fn stop(&self) -> Result<Collection, ConsumerError> {
        let collection = self.collection().ok_or(ConsumerError::NoActiveSession)?;
        self.source.close();
        info!("수집 세션 중지 요청");
        Ok(collection)
    }

    /// 수집된 레코드 (방출 순서)
    ///
    /// 소스가 종료될 때까지 대기한다. 완료 후에는 항상 같은 결과.
    pub async fn get_results(&self) -> Result<Vec<MetricRecord>, ConsumerError> {
        let collection = self.collection().ok_or(ConsumerError::NoActiveSession)?;

        match self.config.result_timeout() {
            Some(limit) => tokio::time::timeout(limit, collection)
                .await
                .map_err(|_| ConsumerError::Timeout {
                    timeout_ms: self.config.result_timeout_ms.unwrap_or_default(),
                })?,
            None => collection.await,
        }
    }

    /// 현재 세션 핸들 (소스를 닫지 않음)
    pub fn collection(&self) -> Option<Collection> {
        self.session.clone()
    }

    /// 등록한 모든 sink를 소스에서 해제
    pub fn detach(&mut self) {
        for id in self.subscriptions.drain(..) {
            if self.source.unpipe(id) {
                debug!("sink 해제: {id}");
            }
        }
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }
}

impl fmt::Debug for TestConsumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestConsumer")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}

impl Drop for TestConsumer {
    fn drop(&mut self) {
        if self.config.unpipe_on_drop {
            self.detach();
        }
    }
}
