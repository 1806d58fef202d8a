//! 모멘텀 지표 (Momentum Indicators).
//!
//! - RSI (Relative Strength Index)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS)), RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 평균은 최근 `period`개 가격 변화의 단순 이동평균입니다 (Wilder 평활 아님).
    /// 따라서 `period + 1`개 종가가 있어야 첫 값이 정의됩니다.
    /// 평균 하락폭이 0이면 RS가 정의되지 않으므로 해당 시점은 None입니다.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI 기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period + 1 {
            return Err(IndicatorError::InsufficientData {
                required: period + 1,
                provided: prices.len(),
            });
        }

        let mut gains = Vec::with_capacity(prices.len() - 1);
        let mut losses = Vec::with_capacity(prices.len() - 1);
        for window in prices.windows(2) {
            let change = window[1] - window[0];
            if change > Decimal::ZERO {
                gains.push(change);
                losses.push(Decimal::ZERO);
            } else {
                gains.push(Decimal::ZERO);
                losses.push(change.abs());
            }
        }

        let period_decimal = Decimal::from(period);
        let mut result = Vec::with_capacity(prices.len());
        // 첫 봉은 변화량이 없음
        result.push(None);

        let mut gain_sum = Decimal::ZERO;
        let mut loss_sum = Decimal::ZERO;
        for i in 0..gains.len() {
            gain_sum += gains[i];
            loss_sum += losses[i];
            if i >= period {
                gain_sum -= gains[i - period];
                loss_sum -= losses[i - period];
            }

            if i + 1 < period {
                result.push(None);
                continue;
            }

            let avg_gain = gain_sum / period_decimal;
            let avg_loss = loss_sum / period_decimal;
            if avg_loss.is_zero() {
                result.push(None);
            } else {
                let rs = avg_gain / avg_loss;
                result.push(Some(dec!(100) - dec!(100) / (Decimal::ONE + rs)));
            }
        }

        Ok(result)
    }
}
