//! PearlScore 복합 점수.
//!
//! 거래량 급증, 추세 강도, 모멘텀 품질, 변동성 페널티를 곱/나눗셈으로 결합합니다.
//!
//! ```text
//! raw        = (spike × strength × momentum) / penalty          (소수 2자리)
//! normalized = clamp(raw / 2.0 × 100, 0, 100)                  (소수 1자리)
//! ```
//!
//! 당일 거래량이 0이거나 20일 평균 거래량이 없으면 "Data Missing"으로 처리하고
//! 점수를 계산하지 않습니다.

use pearl_core::{DecimalExt, IndicatorSnapshot, Price, ScoreStatus, StarRating, Volume};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 정규화 보정 상수. 원점수 2.0이 100점에 해당합니다.
pub const NORMALIZATION_DIVISOR: Decimal = dec!(2.0);

/// 추세 신호 하나당 가중치.
pub const TREND_SIGNAL_WEIGHT: Decimal = dec!(0.2);

/// 별점 구간 (하한 포함, 높은 구간부터 평가).
const STAR_THRESHOLDS: [(Decimal, u8); 4] =
    [(dec!(81), 5), (dec!(61), 4), (dec!(41), 3), (dec!(21), 2)];

/// 점수 계산 입력값.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// 최근 종가
    pub close: Price,
    /// 최근 거래량
    pub volume: Volume,
    /// 20일 평균 거래량
    pub avg_volume: Option<Decimal>,
    pub ma20: Option<Decimal>,
    pub ma60: Option<Decimal>,
    pub rsi14: Option<Decimal>,
    pub macd: Option<Decimal>,
    pub macd_signal: Option<Decimal>,
    pub atr14: Option<Decimal>,
}

impl ScoreInputs {
    /// 지표 스냅샷과 마지막 봉 값으로 입력을 구성합니다.
    pub fn from_snapshot(close: Price, volume: Volume, snapshot: &IndicatorSnapshot) -> Self {
        Self {
            close,
            volume,
            avg_volume: snapshot.volume_ma20,
            ma20: snapshot.ma20,
            ma60: snapshot.ma60,
            rsi14: snapshot.rsi14,
            macd: snapshot.macd,
            macd_signal: snapshot.macd_signal,
            atr14: snapshot.atr14,
        }
    }
}

/// 점수 계산 결과 (구성 요소 포함).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PearlScore {
    pub status: ScoreStatus,
    pub volume_spike: Option<Decimal>,
    pub trend_strength: Option<Decimal>,
    pub momentum_quality: Option<Decimal>,
    pub volatility_penalty: Option<Decimal>,
    /// 원점수
    pub raw: Option<Decimal>,
    /// 0~100 정규화 점수
    pub normalized: Option<Decimal>,
    pub stars: StarRating,
}

impl PearlScore {
    /// 데이터 누락 결과.
    pub fn data_missing() -> Self {
        Self {
            status: ScoreStatus::DataMissing,
            volume_spike: None,
            trend_strength: None,
            momentum_quality: None,
            volatility_penalty: None,
            raw: None,
            normalized: None,
            stars: StarRating::empty(),
        }
    }
}

/// 거래량 급증 비율 (소수 2자리).
///
/// 거래량이 0이거나 평균 거래량이 없거나 0이면 `None`.
pub fn volume_spike(volume: Volume, avg_volume: Option<Decimal>) -> Option<Decimal> {
    let avg = avg_volume.filter(|a| !a.is_zero())?;
    if volume == 0 {
        return None;
    }
    Some((Decimal::from(volume) / avg).round_half_even(2))
}

/// 추세 강도 = 1 + 0.2 × 상승 신호 개수.
///
/// 신호: 종가 > MA20, 종가 > MA60, MACD > 시그널. 값이 없는 비교는 세지 않습니다.
pub fn trend_strength(
    close: Price,
    ma20: Option<Decimal>,
    ma60: Option<Decimal>,
    macd: Option<Decimal>,
    macd_signal: Option<Decimal>,
) -> Decimal {
    let above = |ma: Option<Decimal>| ma.is_some_and(|m| close > m);
    let macd_bullish = matches!((macd, macd_signal), (Some(m), Some(s)) if m > s);

    let count = [above(ma20), above(ma60), macd_bullish]
        .iter()
        .filter(|signal| **signal)
        .count();

    Decimal::ONE + TREND_SIGNAL_WEIGHT * Decimal::from(count)
}

/// 모멘텀 품질 = max(1 − |RSI − 50| / 50, 0).
///
/// RSI가 없으면 정확히 1.0입니다.
pub fn momentum_quality(rsi: Option<Decimal>) -> Decimal {
    match rsi {
        Some(rsi) => (Decimal::ONE - (rsi - dec!(50)).abs() / dec!(50)).max(Decimal::ZERO),
        None => Decimal::ONE,
    }
}

/// 변동성 페널티 = 1 + ATR / 종가.
///
/// 종가가 0 이하이거나 ATR이 없으면 1입니다.
pub fn volatility_penalty(close: Price, atr: Option<Decimal>) -> Decimal {
    match atr {
        Some(atr) if close > Decimal::ZERO => Decimal::ONE + atr / close,
        _ => Decimal::ONE,
    }
}

/// 원점수 (소수 2자리).
pub fn raw_score(spike: Decimal, strength: Decimal, momentum: Decimal, penalty: Decimal) -> Decimal {
    (spike * strength * momentum / penalty).round_half_even(2)
}

/// 정규화 점수 (0~100, 소수 1자리).
pub fn normalize(raw: Decimal) -> Decimal {
    (raw / NORMALIZATION_DIVISOR * dec!(100))
        .clamp(Decimal::ZERO, dec!(100))
        .round_half_even(1)
}

/// 정규화 점수로 별점을 결정합니다.
pub fn star_rating(normalized: Decimal) -> StarRating {
    STAR_THRESHOLDS
        .iter()
        .find(|(threshold, _)| normalized >= *threshold)
        .map(|(_, stars)| StarRating::new(*stars))
        .unwrap_or_else(|| {
            if normalized > Decimal::ZERO {
                StarRating::new(1)
            } else {
                StarRating::empty()
            }
        })
}

/// PearlScore 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct PearlScorer;

impl PearlScorer {
    /// 새 계산기를 생성합니다.
    pub fn new() -> Self {
        Self
    }

    /// 입력값으로 PearlScore를 계산합니다.
    pub fn score(&self, inputs: &ScoreInputs) -> PearlScore {
        let Some(spike) = volume_spike(inputs.volume, inputs.avg_volume) else {
            return PearlScore::data_missing();
        };

        let strength = trend_strength(
            inputs.close,
            inputs.ma20,
            inputs.ma60,
            inputs.macd,
            inputs.macd_signal,
        );
        let momentum = momentum_quality(inputs.rsi14);
        let penalty = volatility_penalty(inputs.close, inputs.atr14);

        let raw = raw_score(spike, strength, momentum, penalty);
        let normalized = normalize(raw);

        PearlScore {
            status: ScoreStatus::Ok,
            volume_spike: Some(spike),
            trend_strength: Some(strength),
            momentum_quality: Some(momentum),
            volatility_penalty: Some(penalty),
            raw: Some(raw),
            normalized: Some(normalized),
            stars: star_rating(normalized),
        }
    }
}
