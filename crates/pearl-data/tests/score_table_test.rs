//! 점수 테이블 저장소 통합 테스트
//!
//! 날짜별 파일명 규칙, 최신 테이블 탐색, `N/A` 표기 왕복을 검증합니다.

use chrono::NaiveDate;
use pearl_core::{ScoreRecord, ScoreStatus, StarRating, TrendArrow};
use pearl_data::{latest_table, read_table, table_path, write_table};
use rust_decimal_macros::dec;

const PREFIX: &str = "kospi_kosdaq_technical";

fn record(code: &str, normalized: Option<rust_decimal::Decimal>) -> ScoreRecord {
    let status = if normalized.is_some() {
        ScoreStatus::Ok
    } else {
        ScoreStatus::DataMissing
    };
    ScoreRecord {
        code: code.to_string(),
        name: format!("종목{}", code),
        market_cap: None,
        close: dec!(10000),
        volume: 1_000,
        volume_spike: normalized.map(|_| dec!(1.10)),
        trend: TrendArrow::Down,
        ma20: Some(dec!(10100.25)),
        ma60: None,
        rsi14: None,
        macd: Some(dec!(-12.5)),
        macd_signal: Some(dec!(-10.02)),
        atr14: Some(dec!(210)),
        obv: Some(-5_000),
        pearl_score: normalized.map(|n| n / dec!(50)),
        pearl_score_normalized: normalized,
        stars: StarRating::new(if normalized.is_some() { 2 } else { 0 }),
        status,
    }
}

#[test]
fn test_daily_table_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
    let path = table_path(dir.path(), PREFIX, date);
    let records = vec![record("005930", Some(dec!(22.0))), record("000660", None)];

    write_table(&path, &records).unwrap();

    assert!(path.ends_with("kospi_kosdaq_technical_20240614.csv"));
    let found = latest_table(dir.path(), PREFIX).unwrap();
    assert_eq!(found.as_deref(), Some(path.as_path()));

    let loaded = read_table(&path).unwrap();
    assert_eq!(loaded, records);
    assert!(loaded[1].pearl_score_normalized.is_none());
    assert!(loaded[0].rsi14.is_none());
}

#[test]
fn test_na_marker_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");

    write_table(&path, &[record("000660", None)]).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let data_line = text.lines().nth(1).unwrap();
    assert!(data_line.contains("N/A"));
    assert!(data_line.ends_with("☆☆☆☆☆,Data Missing"));
}
