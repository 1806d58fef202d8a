//! 네이버 차트 일봉 Provider.
//!
//! `fchart.stock.naver.com/sise.nhn`은 다음 형식의 XML을 반환합니다.
//!
//! ```text
//! <chartdata symbol="005930" name="삼성전자" count="3" timeframe="day">
//!   <item data="20240102|78200|79800|78200|79600|17142847" />
//! </chartdata>
//! ```
//!
//! `data` 속성은 `날짜|시가|고가|저가|종가|거래량` 순서입니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use pearl_core::{Bar, OhlcvSeries, Price};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use super::SeriesProvider;
use crate::error::{DataError, Result};

/// 네이버 차트 기본 주소.
pub const NAVER_CHART_BASE_URL: &str = "https://fchart.stock.naver.com";

/// 네이버 차트 일봉 Provider.
#[derive(Debug, Clone)]
pub struct NaverChartProvider {
    client: Client,
    base_url: String,
    count: usize,
}

impl NaverChartProvider {
    /// 조회 봉 수를 지정하여 생성.
    pub fn new(count: usize) -> Result<Self> {
        Self::with_base_url(NAVER_CHART_BASE_URL, count)
    }

    /// 기본 주소를 지정하여 생성.
    pub fn with_base_url(base_url: impl Into<String>, count: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            count,
        })
    }
}

#[async_trait]
impl SeriesProvider for NaverChartProvider {
    fn name(&self) -> &str {
        "Naver"
    }

    async fn fetch_series(&self, code: &str) -> Result<OhlcvSeries> {
        let url = format!("{}/sise.nhn", self.base_url);
        let count = self.count.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", code),
                ("timeframe", "day"),
                ("count", count.as_str()),
                ("requestType", "0"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !status.is_success() {
            return Err(DataError::Unavailable(format!(
                "네이버 차트 {} 응답 오류: {}",
                code, status
            )));
        }

        // text()는 Content-Type의 charset(EUC-KR)을 따라 디코딩합니다
        let body = response.text().await?;
        let series = parse_chart(&body)?;

        debug!(code, bars = series.len(), "일봉 조회");
        Ok(series)
    }
}

/// 차트 XML을 일봉 시계열로 파싱합니다.
///
/// `item`이 하나도 없으면 빈 시계열입니다.
pub fn parse_chart(body: &str) -> Result<OhlcvSeries> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("item")
        .map_err(|e| DataError::Parse(format!("셀렉터 오류: {:?}", e)))?;

    let bars = document
        .select(&selector)
        .filter_map(|item| item.value().attr("data"))
        .map(parse_item)
        .collect::<Result<Vec<Bar>>>()?;

    Ok(OhlcvSeries::new(bars))
}

/// `날짜|시가|고가|저가|종가|거래량` 한 줄 파싱.
fn parse_item(data: &str) -> Result<Bar> {
    let fields: Vec<&str> = data.split('|').map(str::trim).collect();
    let [date, open, high, low, close, volume] = fields.as_slice() else {
        return Err(DataError::Parse(format!("일봉 필드 수 오류: {}", data)));
    };

    let date = NaiveDate::parse_from_str(date, "%Y%m%d")
        .map_err(|e| DataError::Parse(format!("날짜 '{}': {}", date, e)))?;
    let volume: u64 = volume
        .parse()
        .map_err(|e| DataError::Parse(format!("거래량 '{}': {}", volume, e)))?;

    Ok(Bar::new(
        date,
        parse_price(open)?,
        parse_price(high)?,
        parse_price(low)?,
        parse_price(close)?,
        volume,
    ))
}

fn parse_price(text: &str) -> Result<Price> {
    text.parse()
        .map_err(|e| DataError::Parse(format!("가격 '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CHART_XML: &str = r#"<?xml version="1.0" encoding="EUC-KR" ?>
<protocol>
<chartdata symbol="005930" name="삼성전자" count="3" timeframe="day" precision="0" origintime="19900103">
<item data="20240103|78500|78800|77000|77000|21753644" />
<item data="20240102|78200|79800|78200|79600|17142847" />
<item data="20240104|76100|77300|76100|76600|15324439" />
</chartdata>
</protocol>"#;

    #[test]
    fn test_parse_chart_sorts_by_date() {
        let series = parse_chart(CHART_XML).unwrap();

        assert_eq!(series.len(), 3);
        let first = &series.bars()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(first.open, dec!(78200));
        assert_eq!(first.high, dec!(79800));
        assert_eq!(first.close, dec!(79600));
        assert_eq!(first.volume, 17_142_847);
        assert_eq!(series.last().unwrap().close, dec!(76600));
    }

    #[test]
    fn test_parse_chart_without_items_is_empty() {
        let series = parse_chart("<protocol><chartdata symbol=\"000000\"></chartdata></protocol>")
            .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_item_errors() {
        assert!(parse_item("20240102|1|2|3").is_err());
        assert!(parse_item("2024-01-02|1|2|3|4|5").is_err());
        assert!(parse_item("20240102|1|2|x|4|5").is_err());
        assert!(parse_item("20240102|1|2|3|4|-5").is_err());
    }

    #[tokio::test]
    async fn test_fetch_series_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/sise.nhn")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("symbol".into(), "005930".into()),
                mockito::Matcher::UrlEncoded("count".into(), "120".into()),
            ]))
            .with_header("content-type", "text/xml; charset=utf-8")
            .with_body(CHART_XML)
            .create_async()
            .await;

        let provider = NaverChartProvider::with_base_url(server.url(), 120).unwrap();
        let series = provider.fetch_series("005930").await.unwrap();

        assert_eq!(series.len(), 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_series_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/sise.nhn")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let provider = NaverChartProvider::with_base_url(server.url(), 120).unwrap();
        assert!(matches!(
            provider.fetch_series("005930").await,
            Err(DataError::Unavailable(_))
        ));
    }
}
