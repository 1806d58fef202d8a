//! PearlScore 결과 타입.
//!
//! - `IndicatorSnapshot` - 마지막 봉 기준 지표 값
//! - `TrendArrow` - 허용 오차 밴드가 적용된 단기 추세 방향
//! - `StarRating` - 정규화 점수의 5단계 별점
//! - `ScoreStatus` - 데이터 상태 (OK / Data Missing)
//! - `ScoreRecord` - 종목별 최종 출력 레코드

use crate::types::{Price, Volume};
use crate::PearlError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 마지막 봉 기준 지표 스냅샷.
///
/// 필요한 기간보다 데이터가 짧은 지표는 `None`입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// 5일 이동평균 (추세 화살표 입력)
    pub ma5: Option<Decimal>,
    /// 20일 이동평균
    pub ma20: Option<Decimal>,
    /// 60일 이동평균
    pub ma60: Option<Decimal>,
    /// RSI(14)
    pub rsi14: Option<Decimal>,
    /// MACD 라인
    pub macd: Option<Decimal>,
    /// MACD 시그널 라인
    pub macd_signal: Option<Decimal>,
    /// ATR(14)
    pub atr14: Option<Decimal>,
    /// OBV 누적값
    pub obv: Option<i64>,
    /// 20일 평균 거래량
    pub volume_ma20: Option<Decimal>,
}

/// 단기 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendArrow {
    /// 상승 (↑)
    Up,
    /// 하락 (↓)
    Down,
    /// 보합 (→)
    Flat,
}

impl TrendArrow {
    /// 표시용 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            TrendArrow::Up => "↑",
            TrendArrow::Down => "↓",
            TrendArrow::Flat => "→",
        }
    }
}

impl fmt::Display for TrendArrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TrendArrow {
    type Err = PearlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "↑" | "up" => Ok(TrendArrow::Up),
            "↓" | "down" => Ok(TrendArrow::Down),
            "→" | "flat" => Ok(TrendArrow::Flat),
            other => Err(PearlError::InvalidInput(format!(
                "알 수 없는 추세 기호: {}",
                other
            ))),
        }
    }
}

/// 5단계 별점 (채워진 별 개수 0~5).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StarRating(u8);

impl StarRating {
    /// 별점 최대 개수.
    pub const MAX: u8 = 5;

    const FILLED: char = '★';
    const EMPTY: char = '☆';

    /// 채워진 별 개수로 생성합니다 (5 초과는 5로 제한).
    pub fn new(filled: u8) -> Self {
        Self(filled.min(Self::MAX))
    }

    /// 별이 하나도 채워지지 않은 별점.
    pub fn empty() -> Self {
        Self(0)
    }

    /// 채워진 별 개수.
    pub fn filled(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = self.0 as usize;
        let empty = (Self::MAX - self.0) as usize;
        let text: String = std::iter::repeat(Self::FILLED)
            .take(filled)
            .chain(std::iter::repeat(Self::EMPTY).take(empty))
            .collect();
        f.write_str(&text)
    }
}

impl FromStr for StarRating {
    type Err = PearlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let total = s.chars().count();
        let filled = s.chars().filter(|c| *c == Self::FILLED).count();
        let valid = s.chars().all(|c| c == Self::FILLED || c == Self::EMPTY);

        if !valid || total != Self::MAX as usize {
            return Err(PearlError::InvalidInput(format!("잘못된 별점 문자열: {}", s)));
        }

        Ok(Self(filled as u8))
    }
}

/// 점수 데이터 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreStatus {
    /// 정상 계산
    Ok,
    /// 거래량 데이터 누락 (점수 없음)
    DataMissing,
}

impl ScoreStatus {
    /// 표시 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreStatus::Ok => "OK",
            ScoreStatus::DataMissing => "Data Missing",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreStatus {
    type Err = PearlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OK" => Ok(ScoreStatus::Ok),
            "Data Missing" => Ok(ScoreStatus::DataMissing),
            other => Err(PearlError::InvalidInput(format!(
                "알 수 없는 상태: {}",
                other
            ))),
        }
    }
}

/// 종목별 PearlScore 결과 레코드.
///
/// 실행마다 종목당 한 번 생성되며 생성 후 변경되지 않습니다.
/// 지표 필드는 표시용으로 반올림된 값입니다 (소수 2자리, OBV는 정수).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// 종목 코드
    pub code: String,
    /// 종목명 (한글)
    pub name: String,
    /// 시가총액 (원, 선택적 부가정보)
    pub market_cap: Option<Decimal>,
    /// 최근 종가
    pub close: Price,
    /// 최근 거래량
    pub volume: Volume,
    /// 거래량 급증 비율 (당일 / 20일 평균)
    pub volume_spike: Option<Decimal>,
    /// 추세 화살표
    pub trend: TrendArrow,
    /// 20일 이동평균
    pub ma20: Option<Decimal>,
    /// 60일 이동평균
    pub ma60: Option<Decimal>,
    /// RSI(14)
    pub rsi14: Option<Decimal>,
    /// MACD 라인
    pub macd: Option<Decimal>,
    /// MACD 시그널
    pub macd_signal: Option<Decimal>,
    /// ATR(14)
    pub atr14: Option<Decimal>,
    /// OBV
    pub obv: Option<i64>,
    /// 원점수
    pub pearl_score: Option<Decimal>,
    /// 정규화 점수 (0~100)
    pub pearl_score_normalized: Option<Decimal>,
    /// 별점
    pub stars: StarRating,
    /// 데이터 상태
    pub status: ScoreStatus,
}

impl ScoreRecord {
    /// 시가총액 부가정보를 채운 레코드를 반환합니다.
    pub fn with_market_cap(self, market_cap: Option<Decimal>) -> Self {
        Self { market_cap, ..self }
    }

    /// 점수가 계산된 레코드인지 확인합니다.
    pub fn is_scored(&self) -> bool {
        self.status == ScoreStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_star_rating_display() {
        assert_eq!(StarRating::new(5).to_string(), "★★★★★");
        assert_eq!(StarRating::new(3).to_string(), "★★★☆☆");
        assert_eq!(StarRating::empty().to_string(), "☆☆☆☆☆");
        assert_eq!(StarRating::new(9).filled(), 5);
    }

    #[test]
    fn test_star_rating_parse() {
        assert_eq!("★★☆☆☆".parse::<StarRating>().unwrap(), StarRating::new(2));
        assert_eq!("☆☆☆☆☆".parse::<StarRating>().unwrap(), StarRating::empty());
        assert!("★★★".parse::<StarRating>().is_err());
        assert!("★★x☆☆".parse::<StarRating>().is_err());
    }

    #[test]
    fn test_trend_arrow_symbols() {
        assert_eq!(TrendArrow::Up.to_string(), "↑");
        assert_eq!("↓".parse::<TrendArrow>().unwrap(), TrendArrow::Down);
        assert_eq!("flat".parse::<TrendArrow>().unwrap(), TrendArrow::Flat);
        assert!("?".parse::<TrendArrow>().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [ScoreStatus::Ok, ScoreStatus::DataMissing] {
            assert_eq!(status.as_str().parse::<ScoreStatus>().unwrap(), status);
        }
    }

    proptest! {
        #[test]
        fn prop_star_rating_always_five_symbols(filled in 0u8..=u8::MAX) {
            let rating = StarRating::new(filled);
            let text = rating.to_string();
            prop_assert_eq!(text.chars().count(), 5);
            prop_assert_eq!(text.parse::<StarRating>().unwrap(), rating);
        }
    }
}
