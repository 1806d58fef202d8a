//! 단기 추세 화살표 분류.
//!
//! 최근 종가와 5일 이동평균의 차이를 종가의 0.2% 허용 오차 밴드로 판정합니다.
//! 밴드 경계(|diff| == tolerance)는 보합으로 분류됩니다.

use pearl_core::{Price, TrendArrow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{ScoreError, ScoreResult};

/// 종가 대비 허용 오차 비율 (0.2%).
pub const TOLERANCE_RATIO: Decimal = dec!(0.002);

/// MA5 계산에 필요한 최소 봉 수.
pub const MA5_PERIOD: usize = 5;

/// 종가와 MA5로 추세 방향을 분류합니다.
pub fn classify_trend(close: Price, ma5: Decimal) -> TrendArrow {
    let diff = close - ma5;
    let tolerance = close * TOLERANCE_RATIO;

    if diff.abs() <= tolerance {
        TrendArrow::Flat
    } else if diff > Decimal::ZERO {
        TrendArrow::Up
    } else {
        TrendArrow::Down
    }
}

/// 추세 분류기.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendClassifier;

impl TrendClassifier {
    /// 새 분류기를 생성합니다.
    pub fn new() -> Self {
        Self
    }

    /// 추세 방향을 분류합니다.
    ///
    /// MA5가 정의되지 않았으면(5봉 미만) 종목 단위 오류를 반환합니다.
    pub fn classify(&self, close: Price, ma5: Option<Decimal>) -> ScoreResult<TrendArrow> {
        match ma5 {
            Some(ma5) => Ok(classify_trend(close, ma5)),
            None => Err(ScoreError::InsufficientHistory {
                what: "MA5",
                required: MA5_PERIOD,
            }),
        }
    }
}
