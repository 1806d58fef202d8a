//! 변동성 지표 (Volatility Indicators).
//!
//! - ATR (Average True Range)

use pearl_core::Bar;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// ATR 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtrParams {
    /// ATR 기간 (기본: 14).
    pub period: usize,
}

impl Default for AtrParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 각 봉의 True Range 계산.
    ///
    /// TR = max(고가 - 저가, |고가 - 전일 종가|, |저가 - 전일 종가|)
    /// 첫 봉은 전일 종가가 없으므로 고가 - 저가입니다.
    pub fn true_ranges(&self, bars: &[Bar]) -> Vec<Decimal> {
        let mut prev_close = None;
        bars.iter()
            .map(|bar| {
                let tr = bar.true_range(prev_close);
                prev_close = Some(bar.close);
                tr
            })
            .collect()
    }

    /// ATR 계산.
    ///
    /// 최근 `period`개 True Range의 단순 평균입니다.
    ///
    /// # 반환
    /// 각 시점의 ATR 값 (처음 period-1개는 None)
    pub fn atr(&self, bars: &[Bar], params: AtrParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "ATR 기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if bars.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: bars.len(),
            });
        }

        let tr = self.true_ranges(bars);
        let period_decimal = Decimal::from(period);
        let mut result = Vec::with_capacity(tr.len());
        let mut window_sum = Decimal::ZERO;

        for i in 0..tr.len() {
            window_sum += tr[i];
            if i >= period {
                window_sum -= tr[i - period];
            }

            if i + 1 < period {
                result.push(None);
            } else {
                result.push(Some(window_sum / period_decimal));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bar(day: u32, high: Decimal, low: Decimal, close: Decimal) -> Bar {
        Bar::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            close,
            high,
            low,
            close,
            1_000,
        )
    }

    #[test]
    fn test_true_range_uses_previous_close() {
        let calc = VolatilityIndicators::new();
        let bars = vec![
            bar(1, dec!(105), dec!(95), dec!(100)),
            // 갭 상승: |115 - 100| = 15 > 115 - 108 = 7
            bar(2, dec!(115), dec!(108), dec!(110)),
        ];

        let tr = calc.true_ranges(&bars);

        assert_eq!(tr, vec![dec!(10), dec!(15)]);
    }

    #[test]
    fn test_atr_constant_range() {
        let calc = VolatilityIndicators::new();
        let bars: Vec<Bar> = (1..=20)
            .map(|d| bar(d, dec!(102), dec!(98), dec!(100)))
            .collect();

        let atr = calc.atr(&bars, AtrParams::default()).unwrap();

        assert!(atr[12].is_none());
        assert_eq!(atr[13], Some(dec!(4)));
        assert_eq!(atr[19], Some(dec!(4)));
    }

    #[test]
    fn test_atr_insufficient_data() {
        let calc = VolatilityIndicators::new();
        let bars: Vec<Bar> = (1..=13)
            .map(|d| bar(d, dec!(102), dec!(98), dec!(100)))
            .collect();

        assert!(calc.atr(&bars, AtrParams::default()).is_err());
    }
}
