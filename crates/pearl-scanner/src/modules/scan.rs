//! 전종목 PearlScore 스캔 모듈.
//!
//! 종목 목록을 순서대로 하나씩 처리합니다. 종목 단위 실패는 기록 후 건너뛰고,
//! 종목마다 고정 간격으로 대기하여 데이터 소스의 요청 제한을 지킵니다.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use pearl_analytics::PearlPipeline;
use pearl_core::{dedup_by_code, instrument_span, Instrument, ScanSettings, ScoreRecord};
use pearl_data::{table_path, write_table, MarketCapProvider, SeriesProvider, UniverseProvider};
use tracing::Instrument as _;

use crate::clock::Clock;
use crate::error::{Result, ScanError};
use crate::stats::ScanStats;

/// 스캔 실행 옵션.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 종목 간 대기 시간
    pub request_delay: Duration,
    /// 진행 상황 로그 주기 (종목 수)
    pub progress_every: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from_settings(&ScanSettings::default())
    }
}

impl ScanOptions {
    /// 설정에서 생성.
    pub fn from_settings(settings: &ScanSettings) -> Self {
        Self {
            request_delay: settings.request_delay(),
            progress_every: settings.progress_every.max(1),
        }
    }
}

/// 스캔 결과.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// 종목 목록 순서의 점수 레코드
    pub records: Vec<ScoreRecord>,
    /// 통계
    pub stats: ScanStats,
}

/// 종목 목록 로드 (코드 기준 중복 제거).
///
/// 조회 실패는 스캔 전체를 중단시키는 치명적 오류입니다.
pub async fn load_universe(provider: &dyn UniverseProvider) -> Result<Vec<Instrument>> {
    let instruments = provider.fetch_universe().await.map_err(|e| {
        tracing::error!(provider = provider.name(), error = %e, "종목 목록 조회 실패");
        ScanError::DataSource(format!("{} 종목 목록 조회 실패: {}", provider.name(), e))
    })?;

    let fetched = instruments.len();
    let universe = dedup_by_code(instruments);
    tracing::info!(
        provider = provider.name(),
        fetched,
        unique = universe.len(),
        "종목 목록 로드 완료"
    );
    Ok(universe)
}

/// 지정한 종목 코드만 남깁니다 (종목 목록 순서 유지).
pub fn select_codes(universe: Vec<Instrument>, codes: &[String]) -> Vec<Instrument> {
    for code in codes {
        if !universe.iter().any(|i| &i.code == code) {
            tracing::warn!(code = %code, "종목 목록에 없는 코드");
        }
    }

    universe
        .into_iter()
        .filter(|i| codes.contains(&i.code))
        .collect()
}

/// 종목 목록 전체를 순차적으로 스캔합니다.
///
/// 레코드는 종목 목록 순서로 생성되며, 빈 시계열이나 실패한 종목은 레코드가 없습니다.
/// 시가총액은 레코드가 생성된 종목만 조회하고, 실패해도 점수에는 영향이 없습니다.
pub async fn run_scan(
    universe: &[Instrument],
    series_provider: &dyn SeriesProvider,
    market_cap_provider: Option<&dyn MarketCapProvider>,
    clock: &dyn Clock,
    options: &ScanOptions,
) -> ScanOutcome {
    let start = Instant::now();
    let pipeline = PearlPipeline::new();
    let mut stats = ScanStats::new();
    let mut records = Vec::with_capacity(universe.len());
    let total = universe.len();
    let progress_every = options.progress_every.max(1);

    tracing::info!(
        total,
        provider = series_provider.name(),
        delay_ms = options.request_delay.as_millis() as u64,
        "스캔 시작"
    );

    for (idx, instrument) in universe.iter().enumerate() {
        stats.total += 1;

        let span = instrument_span!("scan_instrument", instrument.code, idx + 1, total);
        let record = scan_instrument(&pipeline, instrument, series_provider, &mut stats)
            .instrument(span.clone())
            .await;

        if let Some(record) = record {
            let record = match market_cap_provider {
                Some(provider) => {
                    enrich_market_cap(record, provider, &mut stats)
                        .instrument(span)
                        .await
                }
                None => record,
            };
            records.push(record);
        }

        if (idx + 1) % progress_every == 0 {
            tracing::info!(processed = idx + 1, total, "진행 {}/{}", idx + 1, total);
        }

        // Rate limiting
        clock.sleep(options.request_delay).await;
    }

    stats.elapsed = start.elapsed();
    ScanOutcome { records, stats }
}

/// 종목 하나 처리: 조회 → 점수 계산.
async fn scan_instrument(
    pipeline: &PearlPipeline,
    instrument: &Instrument,
    series_provider: &dyn SeriesProvider,
    stats: &mut ScanStats,
) -> Option<ScoreRecord> {
    let series = match series_provider.fetch_series(&instrument.code).await {
        Ok(series) => series,
        Err(e) => {
            stats.errors += 1;
            tracing::error!(code = %instrument.code, error = %e, "일봉 조회 실패");
            return None;
        }
    };

    if series.is_empty() {
        stats.empty += 1;
        tracing::debug!(code = %instrument.code, "데이터 없음");
        return None;
    }

    match pipeline.score(instrument, &series) {
        Ok(record) => {
            stats.success += 1;
            if record.is_scored() {
                stats.scored += 1;
            } else {
                stats.data_missing += 1;
            }
            tracing::debug!(
                code = %instrument.code,
                bars = series.len(),
                status = %record.status,
                "점수 계산 완료"
            );
            Some(record)
        }
        Err(e) => {
            stats.errors += 1;
            tracing::error!(code = %instrument.code, error = %e, "점수 계산 실패");
            None
        }
    }
}

/// 시가총액 부가정보 채우기 (실패 시 없음).
async fn enrich_market_cap(
    record: ScoreRecord,
    provider: &dyn MarketCapProvider,
    stats: &mut ScanStats,
) -> ScoreRecord {
    match provider.market_cap(&record.code).await {
        Ok(market_cap) => record.with_market_cap(market_cap),
        Err(e) => {
            stats.market_cap_failures += 1;
            tracing::warn!(code = %record.code, error = %e, "시가총액 조회 실패");
            record
        }
    }
}

/// 스캔 후 날짜별 점수 테이블 파일로 저장합니다.
///
/// 파일 날짜는 `clock`의 오늘 날짜입니다.
pub async fn scan_to_file(
    universe: &[Instrument],
    series_provider: &dyn SeriesProvider,
    market_cap_provider: Option<&dyn MarketCapProvider>,
    clock: &dyn Clock,
    options: &ScanOptions,
    output_dir: &std::path::Path,
    file_prefix: &str,
) -> Result<(PathBuf, ScanOutcome)> {
    let outcome = run_scan(universe, series_provider, market_cap_provider, clock, options).await;

    let path = table_path(output_dir, file_prefix, clock.today());
    write_table(&path, &outcome.records)
        .map_err(|e| ScanError::Output(format!("{}: {}", path.display(), e)))?;

    Ok((path, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_codes_keeps_universe_order() {
        let universe = vec![
            Instrument::new("005930", "삼성전자"),
            Instrument::new("000660", "SK하이닉스"),
            Instrument::new("035720", "카카오"),
        ];
        let codes = vec!["035720".to_string(), "005930".to_string(), "999999".to_string()];

        let selected = select_codes(universe, &codes);

        let selected: Vec<&str> = selected.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(selected, vec!["005930", "035720"]);
    }

    #[test]
    fn test_options_from_settings() {
        let options = ScanOptions::default();
        assert_eq!(options.request_delay, Duration::from_millis(500));
        assert_eq!(options.progress_every, 50);
    }
}
