//! 한국거래소(KRX) 상장 목록 Provider.
//!
//! data.krx.co.kr의 전종목 기본정보(`MDCSTAT01501`)를 시장별로 조회합니다.
//! - `STK`: 유가증권시장 (코스피)
//! - `KSQ`: 코스닥
//!
//! 같은 응답의 `MKTCAP` 컬럼은 `KrxMarketCapLookup`이 시가총액 조회에 사용합니다.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use pearl_core::Instrument;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{MarketCapProvider, UniverseProvider};
use crate::error::{DataError, Result};

/// data.krx.co.kr 기본 주소.
pub const KRX_BASE_URL: &str = "http://data.krx.co.kr";

const JSON_DATA_PATH: &str = "/comm/bldAttendant/getJsonData.cmd";
const LISTING_BLD: &str = "dbms/MDC/STAT/standard/MDCSTAT01501";

/// 상장 종목 한 건.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrxListing {
    /// 단축코드
    pub code: String,
    /// 종목 약명
    pub name: String,
    /// 시가총액 (원)
    pub market_cap: Option<Decimal>,
}

#[derive(Deserialize)]
struct KrxResponse {
    #[serde(rename = "OutBlock_1")]
    out_block: Option<Vec<KrxStock>>,
}

#[derive(Deserialize)]
struct KrxStock {
    #[serde(rename = "ISU_SRT_CD")]
    code: String,
    #[serde(rename = "ISU_ABBRV")]
    name: String,
    #[serde(rename = "MKTCAP", default)]
    market_cap: Option<String>,
}

/// "1,234,567" 형식의 금액 파싱.
fn parse_krx_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    cleaned.parse().ok()
}

/// KRX 상장 목록 Provider.
#[derive(Debug, Clone)]
pub struct KrxListingProvider {
    client: Client,
    base_url: String,
    markets: Vec<String>,
}

impl KrxListingProvider {
    /// 시장 코드 목록으로 생성 (예: `["STK", "KSQ"]`).
    pub fn new(markets: Vec<String>) -> Result<Self> {
        Self::with_base_url(KRX_BASE_URL, markets)
    }

    /// 기본 주소를 지정하여 생성.
    pub fn with_base_url(base_url: impl Into<String>, markets: Vec<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            markets,
        })
    }

    /// 조회 대상 시장 코드.
    pub fn markets(&self) -> &[String] {
        &self.markets
    }

    /// 시장별 상장 목록 조회.
    pub async fn fetch_market(&self, market_code: &str) -> Result<Vec<KrxListing>> {
        let params = [
            ("bld", LISTING_BLD),
            ("mktId", market_code),
            ("share", "1"),
            ("csvxls_isNo", "false"),
        ];

        let url = format!("{}{}", self.base_url, JSON_DATA_PATH);
        let response = self.client.post(&url).form(&params).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !status.is_success() {
            return Err(DataError::Unavailable(format!(
                "KRX {} 상장 목록 응답 오류: {}",
                market_code, status
            )));
        }

        // 차단 시 HTML이 오므로 본문을 먼저 받아 파싱 오류를 구분합니다
        let body = response.text().await?;
        let data: KrxResponse = serde_json::from_str(&body).map_err(|e| {
            DataError::Parse(format!("KRX {} 응답 JSON 파싱 실패: {}", market_code, e))
        })?;

        let listings: Vec<KrxListing> = data
            .out_block
            .unwrap_or_default()
            .into_iter()
            .map(|s| KrxListing {
                code: s.code.trim().to_string(),
                name: s.name.trim().to_string(),
                market_cap: s.market_cap.as_deref().and_then(parse_krx_amount),
            })
            .collect();

        debug!(market = market_code, count = listings.len(), "KRX 상장 목록 조회");
        Ok(listings)
    }

    /// 모든 시장의 상장 목록 조회 (시장 순서 유지).
    pub async fn fetch_all(&self) -> Result<Vec<KrxListing>> {
        let mut all = Vec::new();
        for market in &self.markets {
            let listings = self.fetch_market(market).await?;
            info!("KRX {} 종목 수집: {}개", market, listings.len());
            all.extend(listings);
        }
        Ok(all)
    }
}

#[async_trait]
impl UniverseProvider for KrxListingProvider {
    fn name(&self) -> &str {
        "KRX"
    }

    async fn fetch_universe(&self) -> Result<Vec<Instrument>> {
        let listings = self.fetch_all().await?;
        Ok(listings
            .into_iter()
            .map(|l| Instrument::new(l.code, l.name))
            .collect())
    }
}

/// KRX 상장 목록 기반 시가총액 조회.
///
/// 첫 조회 시 상장 목록을 한 번만 로드합니다. 로드가 실패하면 그 결과를
/// 기억하고 이후 조회마다 같은 오류를 반환하며 재요청하지 않습니다.
#[derive(Debug)]
pub struct KrxMarketCapLookup {
    listing: KrxListingProvider,
    cache: OnceCell<std::result::Result<HashMap<String, Decimal>, String>>,
}

impl KrxMarketCapLookup {
    /// 상장 목록 Provider로 생성.
    pub fn new(listing: KrxListingProvider) -> Self {
        Self {
            listing,
            cache: OnceCell::new(),
        }
    }

    async fn load(&self) -> std::result::Result<HashMap<String, Decimal>, String> {
        match self.listing.fetch_all().await {
            Ok(listings) => {
                let map: HashMap<String, Decimal> = listings
                    .into_iter()
                    .filter_map(|l| l.market_cap.map(|cap| (l.code, cap)))
                    .collect();
                info!("시가총액 캐시 로드: {}개", map.len());
                Ok(map)
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl MarketCapProvider for KrxMarketCapLookup {
    async fn market_cap(&self, code: &str) -> Result<Option<Decimal>> {
        let loaded = self.cache.get_or_init(|| self.load()).await;
        match loaded {
            Ok(map) => Ok(map.get(code).copied()),
            Err(message) => Err(DataError::Unavailable(message.clone())),
        }
    }
}
