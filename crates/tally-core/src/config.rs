//! 테스트 컨슈머 설정 구조체.
//!
//! 결과 대기 타임아웃, 드롭 시 구독 해제 여부를 정의한다.
//! JSON 문자열 또는 파일에서 로드할 수 있다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::CoreError;

/// 테스트 컨슈머 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerConfig {
    /// `get_results` 대기 한도 (밀리초). None이면 소스 종료까지 무한 대기
    #[serde(default)]
    pub result_timeout_ms: Option<u64>,
    /// 컨슈머 드롭 시 등록한 sink를 소스에서 해제할지 여부
    #[serde(default = "default_unpipe_on_drop")]
    pub unpipe_on_drop: bool,
}

fn default_unpipe_on_drop() -> bool {
    true
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ConsumerConfig {
    /// 기본 설정 (타임아웃 없음, 드롭 시 해제)
    pub fn default_config() -> Self {
        Self {
            result_timeout_ms: None,
            unpipe_on_drop: default_unpipe_on_drop(),
        }
    }

    /// JSON 문자열에서 로드
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// JSON 파일에서 로드
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        debug!("컨슈머 설정 로드: {}", path.display());
        Ok(config)
    }

    /// 타임아웃을 `Duration`으로 반환
    pub fn result_timeout(&self) -> Option<Duration> {
        self.result_timeout_ms.map(Duration::from_millis)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.result_timeout_ms == Some(0) {
            return Err(CoreError::Config(
                "result_timeout_ms는 0보다 커야 함".to_string(),
            ));
        }
        Ok(())
    }
}
