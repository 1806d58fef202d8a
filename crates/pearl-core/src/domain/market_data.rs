//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 시장 데이터 관련 타입을 정의합니다:
//! - `Bar` - 일봉 OHLCV 데이터
//! - `OhlcvSeries` - 한 종목의 날짜 오름차순 일봉 시계열

use crate::types::{Price, Volume};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 일봉 OHLCV 데이터.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Price,
    /// 고가
    pub high: Price,
    /// 저가
    pub low: Price,
    /// 종가
    pub close: Price,
    /// 거래량
    pub volume: Volume,
}

impl Bar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Volume,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// True Range를 반환합니다.
    ///
    /// 전일 종가가 없으면(첫 봉) 당일 범위만 사용합니다.
    pub fn true_range(&self, prev_close: Option<Price>) -> Decimal {
        match prev_close {
            Some(prev) => {
                let hc = (self.high - prev).abs();
                let lc = (self.low - prev).abs();
                self.range().max(hc).max(lc)
            }
            None => self.range(),
        }
    }
}

/// 한 종목의 일봉 시계열 (날짜 오름차순).
///
/// 종목 하나를 처리하는 동안만 보관되며 다음 종목으로 넘어가면 폐기됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OhlcvSeries {
    bars: Vec<Bar>,
}

impl OhlcvSeries {
    /// 일봉 목록으로 시계열을 생성합니다 (날짜 오름차순으로 정렬).
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { bars }
    }

    /// 빈 시계열을 생성합니다.
    pub fn empty() -> Self {
        Self::default()
    }

    /// 전체 일봉.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// 일봉 개수.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 데이터가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 마지막 일봉.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// 종가 열.
    pub fn closes(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// 고가 열.
    pub fn highs(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// 저가 열.
    pub fn lows(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// 거래량 열 (Decimal 변환).
    pub fn volumes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| Decimal::from(b.volume)).collect()
    }
}

impl From<Vec<Bar>> for OhlcvSeries {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(bars)
    }
}
