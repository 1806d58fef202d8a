//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 요청 실패
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 응답/파일 파싱 실패
    #[error("파싱 오류: {0}")]
    Parse(String),

    /// CSV 읽기/쓰기 실패
    #[error("CSV 오류: {0}")]
    Csv(#[from] csv::Error),

    /// 파일 입출력 실패
    #[error("I/O 오류: {0}")]
    Io(#[from] std::io::Error),

    /// 데이터 소스 사용 불가 (비정상 응답, 이전 로드 실패 등)
    #[error("데이터 소스 사용 불가: {0}")]
    Unavailable(String),

    /// Rate limit 초과
    #[error("Rate limit 초과")]
    RateLimited,
}

/// 데이터 작업 결과 타입.
pub type Result<T> = std::result::Result<T, DataError>;
