//! 점수 테이블 리포트 모듈.
//!
//! 최신 점수 테이블을 읽어 상위/하위 종목과 필터 결과를 출력하고,
//! 필터 결과를 같은 컬럼 구성의 CSV로 내보냅니다.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pearl_core::{ScoreRecord, TrendArrow};
use pearl_data::{latest_table, read_table, write_table};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 상위/하위 목록 크기.
pub const RANK_SIZE: usize = 10;

/// 리포트 필터.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    /// 최소 거래량 급증 비율
    pub min_spike: Decimal,
    /// 최소 정규화 점수
    pub min_score: Decimal,
    /// 추세 방향 (None: 전체)
    pub trend: Option<TrendArrow>,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            min_spike: dec!(1.0),
            min_score: dec!(50.0),
            trend: None,
        }
    }
}

impl ReportFilter {
    /// 레코드가 필터를 통과하는지 확인합니다.
    ///
    /// 급증 비율이나 점수가 없는 레코드는 통과하지 못합니다.
    pub fn matches(&self, record: &ScoreRecord) -> bool {
        let spike_ok = record.volume_spike.is_some_and(|s| s >= self.min_spike);
        let score_ok = record
            .pearl_score_normalized
            .is_some_and(|s| s >= self.min_score);
        let trend_ok = self.trend.map_or(true, |t| record.trend == t);

        spike_ok && score_ok && trend_ok
    }
}

/// 리포트 실행 옵션.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// 점수 테이블 디렉토리
    pub dir: PathBuf,
    /// 파일명 접두사
    pub file_prefix: String,
    /// 특정 테이블 파일 (없으면 최신 파일)
    pub table: Option<PathBuf>,
    /// 필터
    pub filter: ReportFilter,
    /// 필터 결과 내보내기 경로
    pub export: Option<PathBuf>,
}

fn normalized_desc(a: &ScoreRecord, b: &ScoreRecord) -> std::cmp::Ordering {
    b.pearl_score_normalized.cmp(&a.pearl_score_normalized)
}

fn scored(records: &[ScoreRecord]) -> Vec<&ScoreRecord> {
    records
        .iter()
        .filter(|r| r.pearl_score_normalized.is_some())
        .collect()
}

/// 정규화 점수 상위 `n`개 (동점은 테이블 순서).
pub fn top_n(records: &[ScoreRecord], n: usize) -> Vec<&ScoreRecord> {
    let mut ranked = scored(records);
    ranked.sort_by(|a, b| normalized_desc(a, b));
    ranked.truncate(n);
    ranked
}

/// 정규화 점수 하위 `n`개 (오름차순).
pub fn bottom_n(records: &[ScoreRecord], n: usize) -> Vec<&ScoreRecord> {
    let mut ranked = scored(records);
    ranked.sort_by(|a, b| a.pearl_score_normalized.cmp(&b.pearl_score_normalized));
    ranked.truncate(n);
    ranked
}

/// 필터를 통과한 레코드 (정규화 점수 내림차순).
pub fn filter_records<'a>(records: &'a [ScoreRecord], filter: &ReportFilter) -> Vec<&'a ScoreRecord> {
    let mut matched: Vec<&ScoreRecord> = records.iter().filter(|r| filter.matches(r)).collect();
    matched.sort_by(|a, b| normalized_desc(a, b));
    matched
}

fn fmt_opt(value: Option<Decimal>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// 레코드 목록을 고정폭 텍스트 표로 렌더링합니다.
pub fn render_table(title: &str, records: &[&ScoreRecord]) -> String {
    let mut out = format!("\n{} ({}개)\n", title, records.len());
    out.push_str(&format!(
        "{:<8} {:<16} {:>12} {:>8} {:^5} {:>7} {:>7}  {:<5} {}\n",
        "코드", "종목명", "종가", "급증", "추세", "RSI", "점수", "별점", "상태"
    ));
    for r in records {
        out.push_str(&format!(
            "{:<8} {:<16} {:>12} {:>8} {:^5} {:>7} {:>7}  {} {}\n",
            r.code,
            r.name,
            r.close,
            fmt_opt(r.volume_spike),
            r.trend.symbol(),
            fmt_opt(r.rsi14),
            fmt_opt(r.pearl_score_normalized),
            r.stars,
            r.status,
        ));
    }
    out
}

/// 리포트 실행.
pub fn run_report(options: &ReportOptions) -> Result<()> {
    let path = match &options.table {
        Some(path) => path.clone(),
        None => latest_table(&options.dir, &options.file_prefix)
            .with_context(|| format!("점수 테이블 탐색 실패: {}", options.dir.display()))?
            .with_context(|| {
                format!(
                    "{} 에 {}_*.csv 파일이 없습니다. 먼저 scan을 실행하세요",
                    options.dir.display(),
                    options.file_prefix
                )
            })?,
    };

    let records = read_table(&path)
        .with_context(|| format!("점수 테이블 로드 실패: {}", path.display()))?;
    tracing::info!(path = %path.display(), records = records.len(), "점수 테이블 로드");

    println!("📊 점수 테이블: {}", path.display());
    print!("{}", render_table("🔝 상위 10", &top_n(&records, RANK_SIZE)));
    print!("{}", render_table("🔻 하위 10", &bottom_n(&records, RANK_SIZE)));

    let filtered = filter_records(&records, &options.filter);
    let trend_label = options
        .filter
        .trend
        .map_or_else(|| "전체".to_string(), |t| t.symbol().to_string());
    let title = format!(
        "🔎 필터 (급증 ≥ {}, 점수 ≥ {}, 추세 {})",
        options.filter.min_spike, options.filter.min_score, trend_label
    );
    print!("{}", render_table(&title, &filtered));

    if let Some(export) = &options.export {
        export_records(export, &filtered)?;
        println!("\n📁 필터 결과 저장됨: {}", export.display());
    }

    Ok(())
}

/// 필터 결과를 CSV로 내보냅니다.
pub fn export_records(path: &Path, records: &[&ScoreRecord]) -> Result<()> {
    let owned: Vec<ScoreRecord> = records.iter().map(|r| (*r).clone()).collect();
    write_table(path, &owned).with_context(|| format!("내보내기 실패: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pearl_core::{ScoreStatus, StarRating};

    fn record(code: &str, spike: Option<Decimal>, score: Option<Decimal>, trend: TrendArrow) -> ScoreRecord {
        ScoreRecord {
            code: code.to_string(),
            name: code.to_string(),
            market_cap: None,
            close: dec!(1000),
            volume: 100,
            volume_spike: spike,
            trend,
            ma20: None,
            ma60: None,
            rsi14: None,
            macd: None,
            macd_signal: None,
            atr14: None,
            obv: None,
            pearl_score: score.map(|s| s / dec!(50)),
            pearl_score_normalized: score,
            stars: StarRating::empty(),
            status: if score.is_some() {
                ScoreStatus::Ok
            } else {
                ScoreStatus::DataMissing
            },
        }
    }

    fn sample() -> Vec<ScoreRecord> {
        vec![
            record("A", Some(dec!(1.5)), Some(dec!(70.0)), TrendArrow::Up),
            record("B", Some(dec!(0.8)), Some(dec!(90.0)), TrendArrow::Up),
            record("C", None, None, TrendArrow::Flat),
            record("D", Some(dec!(2.0)), Some(dec!(55.0)), TrendArrow::Down),
            record("E", Some(dec!(1.0)), Some(dec!(50.0)), TrendArrow::Up),
            record("F", Some(dec!(3.0)), Some(dec!(10.0)), TrendArrow::Up),
        ]
    }

    fn codes(records: &[&ScoreRecord]) -> Vec<String> {
        records.iter().map(|r| r.code.clone()).collect()
    }

    #[test]
    fn test_top_and_bottom_exclude_missing() {
        let records = sample();

        assert_eq!(codes(&top_n(&records, 3)), vec!["B", "A", "D"]);
        assert_eq!(codes(&bottom_n(&records, 2)), vec!["F", "E"]);
        assert_eq!(top_n(&records, 10).len(), 5);
    }

    #[test]
    fn test_default_filter() {
        let records = sample();
        let filtered = filter_records(&records, &ReportFilter::default());

        // B는 급증 미달, F는 점수 미달, C는 값 없음
        assert_eq!(codes(&filtered), vec!["A", "D", "E"]);
    }

    #[test]
    fn test_trend_filter() {
        let records = sample();
        let filter = ReportFilter {
            trend: Some(TrendArrow::Up),
            ..ReportFilter::default()
        };

        assert_eq!(codes(&filter_records(&records, &filter)), vec!["A", "E"]);
    }

    #[test]
    fn test_render_table_contains_rows() {
        let records = sample();
        let text = render_table("상위", &top_n(&records, 2));

        assert!(text.contains("상위 (2개)"));
        assert!(text.contains("90.0"));
        assert!(text.contains("☆☆☆☆☆"));
    }

    #[test]
    fn test_run_report_exports_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("kospi_kosdaq_technical_20240614.csv");
        write_table(&table, &sample()).unwrap();

        let export = dir.path().join("filtered.csv");
        let options = ReportOptions {
            dir: dir.path().to_path_buf(),
            file_prefix: "kospi_kosdaq_technical".to_string(),
            table: None,
            filter: ReportFilter::default(),
            export: Some(export.clone()),
        };

        run_report(&options).unwrap();

        let exported = read_table(&export).unwrap();
        let exported: Vec<&str> = exported.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(exported, vec!["A", "D", "E"]);
    }

    #[test]
    fn test_run_report_without_table() {
        let dir = tempfile::tempdir().unwrap();
        let options = ReportOptions {
            dir: dir.path().to_path_buf(),
            file_prefix: "kospi_kosdaq_technical".to_string(),
            table: None,
            filter: ReportFilter::default(),
            export: None,
        };

        assert!(run_report(&options).is_err());
    }
}
