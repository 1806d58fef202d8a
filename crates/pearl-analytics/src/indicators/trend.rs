//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간 (span).
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Decimal,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: Decimal,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Decimal,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 인자
    /// * `values` - 입력 데이터 (종가 또는 거래량)
    /// * `params` - SMA 파라미터
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        values: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if values.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: values.len(),
            });
        }

        let mut result = Vec::with_capacity(values.len());
        let period_decimal = Decimal::from(period);
        let mut window_sum = Decimal::ZERO;

        // 누적합을 밀어가며 계산 (Decimal 덧셈/뺄셈은 오차 없음)
        for (i, value) in values.iter().enumerate() {
            window_sum += *value;
            if i >= period {
                window_sum -= values[i - period];
            }

            if i + 1 < period {
                result.push(None);
            } else {
                result.push(Some(window_sum / period_decimal));
            }
        }

        Ok(result)
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA_0 = P_0
    /// EMA_t = (P_t × k) + (EMA_{t-1} × (1 - k)), k = 2 / (period + 1)
    ///
    /// 첫 값으로 시작하는 재귀식이며 보정(adjust)을 하지 않으므로
    /// 첫 봉부터 값이 정의됩니다.
    ///
    /// # 인자
    /// * `values` - 입력 데이터
    /// * `params` - EMA 파라미터
    pub fn ema(&self, values: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        let Some(first) = values.first() else {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        };

        let multiplier = dec!(2) / Decimal::from(period + 1);
        let one_minus = Decimal::ONE - multiplier;

        let mut result = Vec::with_capacity(values.len());
        let mut prev_ema = *first;
        result.push(prev_ema);

        for value in values.iter().skip(1) {
            let ema = (*value * multiplier) + (prev_ema * one_minus);
            result.push(ema);
            prev_ema = ema;
        }

        Ok(result)
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// # 반환
    /// 각 시점의 MACD, 시그널, 히스토그램 값
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        let fast_ema = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        )?;
        let slow_ema = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        )?;

        let macd_line: Vec<Decimal> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(fast, slow)| *fast - *slow)
            .collect();

        let signal_line = self.ema(
            &macd_line,
            EmaParams {
                period: params.signal_period,
            },
        )?;

        Ok(macd_line
            .into_iter()
            .zip(signal_line)
            .map(|(macd, signal)| MacdResult {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect())
    }
}
