//! 에러 타입 정의.

use std::fmt;

/// Scanner 에러 타입
#[derive(Debug)]
pub enum ScanError {
    /// 데이터 소스 에러 (종목 목록 조회 실패 등)
    DataSource(String),
    /// 결과 저장 에러
    Output(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataSource(msg) => write!(f, "Data source error: {}", msg),
            Self::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for ScanError {}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, ScanError>;
