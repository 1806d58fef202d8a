//! 종목 단위 PearlScore 파이프라인 통합 테스트
//!
//! 일봉 시계열 하나를 입력으로 지표 → 추세 → 점수 → 레코드까지의
//! 경계 조건(짧은 이력, 거래량 0, RSI 손실 0)을 검증합니다.

use chrono::{Duration, NaiveDate};
use pearl_analytics::{score_instrument, PearlPipeline, ScoreError};
use pearl_core::{Bar, Instrument, OhlcvSeries, ScoreStatus, TrendArrow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ============================================================================
// 테스트 헬퍼 함수
// ============================================================================

fn samsung() -> Instrument {
    Instrument::new("005930", "삼성전자")
}

/// 종가 목록으로 시계열 생성 (고가 +1, 저가 -1)
fn series(closes: &[Decimal], volumes: &[u64]) -> OhlcvSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (close, volume))| {
            Bar::new(
                start + Duration::days(i as i64),
                *close,
                *close + dec!(1),
                *close - dec!(1),
                *close,
                *volume,
            )
        })
        .collect();
    OhlcvSeries::new(bars)
}

/// 단조 상승 시계열 (마지막 봉 거래량 2배)
fn rising_series(len: usize) -> OhlcvSeries {
    let closes: Vec<Decimal> = (0..len).map(|i| Decimal::from(100 + i as i64)).collect();
    let mut volumes = vec![1_000u64; len];
    if let Some(last) = volumes.last_mut() {
        *last = 2_000;
    }
    series(&closes, &volumes)
}

// ============================================================================
// 이력 길이
// ============================================================================

#[test]
fn test_short_series_cannot_classify_trend() {
    let closes = [dec!(100), dec!(101), dec!(102), dec!(103)];
    let result = score_instrument(&samsung(), &series(&closes, &[1_000; 4]));

    assert!(matches!(
        result,
        Err(ScoreError::InsufficientHistory { what: "MA5", required: 5 })
    ));
}

#[test]
fn test_five_bars_without_volume_average_is_data_missing() {
    let closes = [dec!(100), dec!(101), dec!(102), dec!(103), dec!(104)];
    let record = score_instrument(&samsung(), &series(&closes, &[1_000; 5])).unwrap();

    // MA5 = 102, 허용 오차 0.208 → 상승
    assert_eq!(record.trend, TrendArrow::Up);
    assert_eq!(record.status, ScoreStatus::DataMissing);
    assert!(record.ma20.is_none());
    assert!(record.pearl_score_normalized.is_none());
    assert_eq!(record.stars.to_string(), "☆☆☆☆☆");
}

#[test]
fn test_empty_series() {
    let result = score_instrument(&samsung(), &OhlcvSeries::empty());
    assert!(matches!(result, Err(ScoreError::EmptySeries)));
}

// ============================================================================
// 점수 경계 조건
// ============================================================================

#[test]
fn test_zero_volume_is_data_missing() {
    let closes: Vec<Decimal> = (0..30).map(|i| Decimal::from(100 + i)).collect();
    let mut volumes = vec![1_000u64; 30];
    volumes[29] = 0;

    let record = score_instrument(&samsung(), &series(&closes, &volumes)).unwrap();

    assert_eq!(record.status, ScoreStatus::DataMissing);
    assert_eq!(record.volume, 0);
    assert!(record.volume_spike.is_none());
    assert!(record.pearl_score.is_none());
    assert!(record.pearl_score_normalized.is_none());
    assert_eq!(record.stars.to_string(), "☆☆☆☆☆");
    // 지표는 여전히 채워짐
    assert!(record.ma20.is_some());
}

#[test]
fn test_rsi_zero_loss_uses_neutral_momentum() {
    let record = score_instrument(&samsung(), &rising_series(70)).unwrap();

    // 하락이 한 번도 없음 → RSI 정의되지 않음
    assert!(record.rsi14.is_none());
    assert_eq!(record.status, ScoreStatus::Ok);
    assert_eq!(record.trend, TrendArrow::Up);
    // 평균 거래량 1050 → 2000 / 1050 = 1.90
    assert_eq!(record.volume_spike, Some(dec!(1.90)));
    // 1.90 × 1.6 × 1.0 / (1 + 2/169) = 3.00
    assert_eq!(record.pearl_score, Some(dec!(3.00)));
    assert_eq!(record.pearl_score_normalized, Some(dec!(100.0)));
    assert_eq!(record.stars.to_string(), "★★★★★");
    assert_eq!(record.atr14, Some(dec!(2)));
    assert_eq!(record.obv, Some(70_000));
}

#[test]
fn test_normalized_score_is_bounded() {
    let closes: Vec<Decimal> = (0..80)
        .map(|i| if i % 3 == 0 { dec!(100) } else { dec!(97) + Decimal::from(i % 5) })
        .collect();
    let volumes: Vec<u64> = (0..80).map(|i| 500 + (i * 37 % 400)).collect();

    let record = score_instrument(&samsung(), &series(&closes, &volumes)).unwrap();

    let normalized = record.pearl_score_normalized.unwrap();
    assert!(normalized >= Decimal::ZERO && normalized <= dec!(100));
    assert!(record.pearl_score.unwrap() >= Decimal::ZERO);
}

// ============================================================================
// 결정성
// ============================================================================

#[test]
fn test_pipeline_is_idempotent() {
    let pipeline = PearlPipeline::new();
    let data = rising_series(120);

    let first = pipeline.score(&samsung(), &data).unwrap();
    let second = pipeline.score(&samsung(), &data).unwrap();

    assert_eq!(first, second);
    assert_eq!(format!("{:?}", first), format!("{:?}", second));
}
