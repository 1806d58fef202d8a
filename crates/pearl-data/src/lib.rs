//! 데이터 수집 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 스캔 대상 종목 목록 Provider (KRX 상장 목록, 로컬 CSV)
//! - 일봉 OHLCV Provider (네이버 차트)
//! - 시가총액 조회 Provider (KRX 상장 목록 캐시)
//! - 점수 테이블 CSV 저장/로드

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

// Provider 재내보내기
pub use provider::{
    CsvUniverseProvider, KrxListing, KrxListingProvider, KrxMarketCapLookup, MarketCapProvider,
    NaverChartProvider, SeriesProvider, UniverseProvider,
};

// 점수 테이블 재내보내기
pub use storage::score_table::{latest_table, read_table, table_path, write_table, SCORE_COLUMNS};
