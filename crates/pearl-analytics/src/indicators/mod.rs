//! 기술적 지표 모듈.
//!
//! PearlScore 계산에 필요한 기술적 지표를 `Decimal`로 계산합니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **SMA**: 단순 이동평균 (MA5, MA20, MA60, 20일 평균 거래량)
//! - **EMA**: 지수 이동평균 (첫 값 시드, 보정 없음)
//! - **MACD**: 12/26 EMA 차이와 9 EMA 시그널
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 14일 단순평균 기반 상대강도지수
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **ATR**: 14일 True Range 단순평균
//!
//! ## 거래량 지표
//! - **OBV**: 누적 거래량
//!
//! # 사용 예시
//!
//! ```ignore
//! use pearl_analytics::indicators::IndicatorEngine;
//!
//! let engine = IndicatorEngine::new();
//! let snapshot = engine.snapshot(&series)?;
//! println!("MA20 = {:?}", snapshot.ma20);
//! ```

pub mod momentum;
pub mod obv;
pub mod trend;
pub mod volatility;

use pearl_core::{IndicatorSnapshot, OhlcvSeries};
use rust_decimal::Decimal;
use thiserror::Error;

pub use momentum::{MomentumCalculator, RsiParams};
pub use obv::ObvIndicator;
pub use trend::{EmaParams, MacdParams, MacdResult, SmaParams, TrendIndicators};
pub use volatility::{AtrParams, VolatilityIndicators};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 시계열 결과의 마지막 값을 꺼냅니다.
///
/// 데이터 부족은 "값 없음"으로 취급하고 그 외 오류는 그대로 전파합니다.
fn latest<T: Copy>(result: IndicatorResult<Vec<Option<T>>>) -> IndicatorResult<Option<T>> {
    match result {
        Ok(values) => Ok(values.last().copied().flatten()),
        Err(IndicatorError::InsufficientData { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// 통합 지표 엔진.
///
/// 스크리너가 사용하는 모든 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
    obv: ObvIndicator,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 추세 지표 ====================

    /// 단순 이동평균 (SMA) 계산.
    pub fn sma(&self, values: &[Decimal], params: SmaParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.trend.sma(values, params)
    }

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, values: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
        self.trend.ema(values, params)
    }

    /// MACD 계산.
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        self.trend.macd(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI 계산.
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.rsi(prices, params)
    }

    // ==================== 변동성 지표 ====================

    /// ATR 계산.
    pub fn atr(&self, series: &OhlcvSeries, params: AtrParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.volatility.atr(series.bars(), params)
    }

    // ==================== 거래량 지표 ====================

    /// OBV 계산.
    pub fn obv(&self, series: &OhlcvSeries) -> IndicatorResult<Vec<i64>> {
        let volumes: Vec<u64> = series.bars().iter().map(|b| b.volume).collect();
        self.obv.calculate(&series.closes(), &volumes)
    }

    // ==================== 스냅샷 ====================

    /// 마지막 봉 기준 지표 스냅샷 계산.
    ///
    /// 기간보다 짧은 시계열의 지표는 `None`으로 채워지며 오류가 아닙니다.
    /// 빈 시계열이면 모든 값이 `None`입니다.
    pub fn snapshot(&self, series: &OhlcvSeries) -> IndicatorResult<IndicatorSnapshot> {
        if series.is_empty() {
            return Ok(IndicatorSnapshot::default());
        }

        let closes = series.closes();
        let volumes = series.volumes();

        let macd = self.macd(&closes, MacdParams::default())?;
        let last_macd = macd.last();

        Ok(IndicatorSnapshot {
            ma5: latest(self.sma(&closes, SmaParams { period: 5 }))?,
            ma20: latest(self.sma(&closes, SmaParams { period: 20 }))?,
            ma60: latest(self.sma(&closes, SmaParams { period: 60 }))?,
            rsi14: latest(self.rsi(&closes, RsiParams::default()))?,
            macd: last_macd.map(|m| m.macd),
            macd_signal: last_macd.map(|m| m.signal),
            atr14: latest(self.atr(series, AtrParams::default()))?,
            obv: self.obv(series)?.last().copied(),
            volume_ma20: latest(self.sma(&volumes, SmaParams { period: 20 }))?,
        })
    }
}
