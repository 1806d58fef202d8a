//! OBV (On-Balance Volume) 지표.
//!
//! 종가 방향에 따라 거래량을 누적합니다.
//! - 종가 상승: OBV += 거래량
//! - 종가 하락: OBV -= 거래량
//! - 변동 없음: OBV 유지

use pearl_core::sign;
use rust_decimal::Decimal;

use super::{IndicatorError, IndicatorResult};

/// OBV 계산기.
#[derive(Debug, Default)]
pub struct ObvIndicator;

impl ObvIndicator {
    /// 새로운 OBV 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// OBV 시계열 계산.
    ///
    /// 첫 봉은 기여분이 0이며, 값은 전체 이력에 대한 누적합입니다.
    pub fn calculate(&self, closes: &[Decimal], volumes: &[u64]) -> IndicatorResult<Vec<i64>> {
        if closes.len() != volumes.len() {
            return Err(IndicatorError::InvalidParameter(format!(
                "종가({})와 거래량({}) 길이가 다릅니다",
                closes.len(),
                volumes.len()
            )));
        }

        let mut result = Vec::with_capacity(closes.len());
        let mut obv: i64 = 0;
        let mut prev_close: Option<Decimal> = None;

        for (close, volume) in closes.iter().zip(volumes) {
            if let Some(prev) = prev_close {
                let volume = i64::try_from(*volume).unwrap_or(i64::MAX);
                obv = obv.saturating_add(sign(*close - prev).saturating_mul(volume));
            }
            result.push(obv);
            prev_close = Some(*close);
        }

        Ok(result)
    }
}
