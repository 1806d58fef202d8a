//! 스크리너 핵심 에러 타입.
//!
//! 이 모듈은 도메인 및 설정 계층에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 스크리너 에러.
#[derive(Debug, Error)]
pub enum PearlError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type PearlResult<T> = Result<T, PearlError>;

impl From<config::ConfigError> for PearlError {
    fn from(err: config::ConfigError) -> Self {
        PearlError::Config(err.to_string())
    }
}
