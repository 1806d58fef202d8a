//! 데이터 Provider 모듈.
//!
//! 스캐너가 의존하는 세 가지 외부 협력자를 trait으로 정의합니다.
//!
//! ## 종목 목록
//! - `KrxListingProvider`: 한국거래소 상장 목록 (KOSPI/KOSDAQ)
//! - `CsvUniverseProvider`: 로컬 CSV (`Code,Name`)
//!
//! ## 일봉 시계열
//! - `NaverChartProvider`: 네이버 차트 일봉
//!
//! ## 시가총액
//! - `KrxMarketCapLookup`: KRX 상장 목록의 시가총액을 한 번 로드해 캐시

pub mod csv_universe;
pub mod krx;
pub mod naver;

use async_trait::async_trait;
use pearl_core::{Instrument, OhlcvSeries};
use rust_decimal::Decimal;

use crate::error::Result;

pub use csv_universe::CsvUniverseProvider;
pub use krx::{KrxListing, KrxListingProvider, KrxMarketCapLookup};
pub use naver::NaverChartProvider;

/// 스캔 대상 종목 목록 Provider.
#[async_trait]
pub trait UniverseProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 전체 종목 목록 조회.
    ///
    /// 실패 시 스캔은 레코드를 만들기 전에 중단됩니다.
    async fn fetch_universe(&self) -> Result<Vec<Instrument>>;
}

/// 일봉 시계열 Provider.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 종목의 일봉 시계열 조회 (날짜 오름차순).
    ///
    /// 데이터가 없으면 빈 시계열을 반환합니다.
    async fn fetch_series(&self, code: &str) -> Result<OhlcvSeries>;
}

/// 시가총액 조회 Provider.
#[async_trait]
pub trait MarketCapProvider: Send + Sync {
    /// 종목의 시가총액 (원). 목록에 없으면 `None`.
    async fn market_cap(&self, code: &str) -> Result<Option<Decimal>>;
}
