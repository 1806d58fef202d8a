//! 종목 단위 점수 계산 에러.

use thiserror::Error;

use crate::indicators::IndicatorError;

/// 점수 계산 에러.
///
/// 오케스트레이터는 이 에러를 종목 단위 실패로 기록하고 다음 종목으로 넘어갑니다.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// 시계열이 비어 있음
    #[error("시계열 데이터가 비어 있습니다")]
    EmptySeries,

    /// 필수 값 계산에 필요한 이력 부족
    #[error("{what} 계산에 데이터가 부족합니다: 최소 {required}개 필요")]
    InsufficientHistory { what: &'static str, required: usize },

    /// 지표 계산 오류
    #[error("지표 계산 오류: {0}")]
    Indicator(#[from] IndicatorError),
}

/// 점수 계산 결과 타입.
pub type ScoreResult<T> = Result<T, ScoreError>;
