//! 점수 테이블 CSV 저장소.
//!
//! 컬럼 순서는 고정이며, 값이 없는 숫자 필드는 `N/A`로 기록합니다
//! (0이나 빈 문자열과 구분). 파일은 스프레드시트 호환을 위해 UTF-8 BOM으로 시작합니다.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;
use pearl_core::ScoreRecord;
use tracing::info;

use crate::error::{DataError, Result};

/// 값 없음 표시.
pub const NA_MARKER: &str = "N/A";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 점수 테이블 컬럼 (순서 고정).
pub const SCORE_COLUMNS: [&str; 18] = [
    "StockCode",
    "StockName_KR",
    "MarketCap",
    "ClosingPrice",
    "DailyVolume",
    "VolumeSpike",
    "TrendArrow",
    "MA20",
    "MA60",
    "RSI(14)",
    "MACD",
    "MACD_Signal",
    "Volatility(ATR)",
    "OBV",
    "PearlScore",
    "PearlScore_Normalized",
    "PearlScore_Stars",
    "PearlScore_Status",
];

/// 날짜별 테이블 경로: `{dir}/{prefix}_{YYYYMMDD}.csv`.
pub fn table_path(dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}_{}.csv", prefix, date.format("%Y%m%d")))
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| NA_MARKER.to_string())
}

/// 레코드를 CSV 행으로 변환합니다.
pub fn record_to_row(record: &ScoreRecord) -> Vec<String> {
    vec![
        record.code.clone(),
        record.name.clone(),
        opt(&record.market_cap),
        record.close.to_string(),
        record.volume.to_string(),
        opt(&record.volume_spike),
        record.trend.to_string(),
        opt(&record.ma20),
        opt(&record.ma60),
        opt(&record.rsi14),
        opt(&record.macd),
        opt(&record.macd_signal),
        opt(&record.atr14),
        opt(&record.obv),
        opt(&record.pearl_score),
        opt(&record.pearl_score_normalized),
        record.stars.to_string(),
        record.status.to_string(),
    ]
}

/// 레코드를 CSV 작성기에 기록합니다 (헤더 포함).
pub fn write_records<W: Write>(writer: W, records: &[ScoreRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SCORE_COLUMNS)?;
    for record in records {
        wtr.write_record(record_to_row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// 점수 테이블 파일 저장.
///
/// 상위 디렉토리가 없으면 생성합니다.
pub fn write_table(path: &Path, records: &[ScoreRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    write_records(file, records)?;

    info!("점수 테이블 저장: {} ({}개)", path.display(), records.len());
    Ok(())
}

fn field<'a>(row: &'a StringRecord, index: usize) -> Result<&'a str> {
    row.get(index)
        .map(str::trim)
        .ok_or_else(|| DataError::Parse(format!("{} 컬럼 없음", SCORE_COLUMNS[index])))
}

fn parse_value<T>(row: &StringRecord, index: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text = field(row, index)?;
    text.parse()
        .map_err(|e| DataError::Parse(format!("{} '{}': {}", SCORE_COLUMNS[index], text, e)))
}

fn parse_opt<T>(row: &StringRecord, index: usize) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if field(row, index)? == NA_MARKER {
        return Ok(None);
    }
    parse_value(row, index).map(Some)
}

fn row_to_record(row: &StringRecord) -> Result<ScoreRecord> {
    Ok(ScoreRecord {
        code: field(row, 0)?.to_string(),
        name: field(row, 1)?.to_string(),
        market_cap: parse_opt(row, 2)?,
        close: parse_value(row, 3)?,
        volume: parse_value(row, 4)?,
        volume_spike: parse_opt(row, 5)?,
        trend: parse_value(row, 6)?,
        ma20: parse_opt(row, 7)?,
        ma60: parse_opt(row, 8)?,
        rsi14: parse_opt(row, 9)?,
        macd: parse_opt(row, 10)?,
        macd_signal: parse_opt(row, 11)?,
        atr14: parse_opt(row, 12)?,
        obv: parse_opt(row, 13)?,
        pearl_score: parse_opt(row, 14)?,
        pearl_score_normalized: parse_opt(row, 15)?,
        stars: parse_value(row, 16)?,
        status: parse_value(row, 17)?,
    })
}

/// CSV 텍스트에서 레코드를 읽습니다 (UTF-8 BOM 허용).
pub fn parse_table(text: &str) -> Result<Vec<ScoreRecord>> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if !headers.iter().map(str::trim).eq(SCORE_COLUMNS.iter().copied()) {
        return Err(DataError::Parse(format!(
            "점수 테이블 헤더 불일치: {:?}",
            headers
        )));
    }

    reader
        .records()
        .map(|row| row_to_record(&row?))
        .collect()
}

/// 점수 테이블 파일 로드.
pub fn read_table(path: &Path) -> Result<Vec<ScoreRecord>> {
    let text = fs::read_to_string(path)?;
    parse_table(&text)
}

/// 디렉토리에서 가장 최근에 수정된 점수 테이블을 찾습니다.
///
/// `{prefix}_*.csv` 형식의 파일만 대상이며, 없으면 `None`입니다.
pub fn latest_table(dir: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    if !dir.exists() {
        return Ok(None);
    }

    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.starts_with(&format!("{}_", prefix)) || !file_name.ends_with(".csv") {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        let newer = match &latest {
            Some((time, current)) => (modified, &path) > (*time, current),
            None => true,
        };
        if newer {
            latest = Some((modified, path));
        }
    }

    Ok(latest.map(|(_, path)| path))
}
