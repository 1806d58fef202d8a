//! 종목 단위 점수 파이프라인.
//!
//! 일봉 시계열 → 지표 스냅샷 → 추세 분류 → PearlScore → `ScoreRecord`.
//! 같은 시계열에는 항상 같은 레코드를 반환합니다.

use pearl_core::{DecimalExt, Instrument, OhlcvSeries, ScoreRecord};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{ScoreError, ScoreResult};
use crate::indicators::IndicatorEngine;
use crate::pearl_score::{PearlScorer, ScoreInputs};
use crate::trend_arrow::TrendClassifier;

/// 표시용 지표 소수 자릿수.
const DISPLAY_DP: u32 = 2;

fn display(value: Option<Decimal>) -> Option<Decimal> {
    value.map(|v| v.round_half_even(DISPLAY_DP))
}

/// 지표 엔진, 추세 분류기, 점수 계산기를 묶은 파이프라인.
#[derive(Debug, Default)]
pub struct PearlPipeline {
    engine: IndicatorEngine,
    classifier: TrendClassifier,
    scorer: PearlScorer,
}

impl PearlPipeline {
    /// 새 파이프라인을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 한 종목의 점수 레코드를 계산합니다.
    ///
    /// 점수는 반올림 전 지표 값으로 계산하고, 레코드에는 표시용으로
    /// 반올림된 값을 담습니다. 시가총액은 비어 있습니다.
    pub fn score(&self, instrument: &Instrument, series: &OhlcvSeries) -> ScoreResult<ScoreRecord> {
        let last = series.last().ok_or(ScoreError::EmptySeries)?;

        let snapshot = self.engine.snapshot(series)?;
        let trend = self.classifier.classify(last.close, snapshot.ma5)?;

        let inputs = ScoreInputs::from_snapshot(last.close, last.volume, &snapshot);
        let score = self.scorer.score(&inputs);

        debug!(
            code = %instrument.code,
            bars = series.len(),
            status = %score.status,
            raw = ?score.raw,
            "점수 계산 완료"
        );

        Ok(ScoreRecord {
            code: instrument.code.clone(),
            name: instrument.name.clone(),
            market_cap: None,
            close: last.close,
            volume: last.volume,
            volume_spike: score.volume_spike,
            trend,
            ma20: display(snapshot.ma20),
            ma60: display(snapshot.ma60),
            rsi14: display(snapshot.rsi14),
            macd: display(snapshot.macd),
            macd_signal: display(snapshot.macd_signal),
            atr14: display(snapshot.atr14),
            obv: snapshot.obv,
            pearl_score: score.raw,
            pearl_score_normalized: score.normalized,
            stars: score.stars,
            status: score.status,
        })
    }
}

/// 기본 파이프라인으로 한 종목을 계산합니다.
pub fn score_instrument(instrument: &Instrument, series: &OhlcvSeries) -> ScoreResult<ScoreRecord> {
    PearlPipeline::new().score(instrument, series)
}
