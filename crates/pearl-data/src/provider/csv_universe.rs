//! 로컬 CSV 종목 목록 Provider.
//!
//! `Code,Name` 헤더를 가진 CSV에서 스캔 대상 종목을 읽습니다.
//! 스프레드시트에서 앞자리 0이 빠진 숫자 코드는 6자리로 복원합니다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pearl_core::Instrument;
use serde::Deserialize;
use tracing::info;

use super::UniverseProvider;
use crate::error::{DataError, Result};

/// 국내 주식 단축코드 길이.
const KR_CODE_LEN: usize = 6;

#[derive(Debug, Deserialize)]
struct UniverseRow {
    #[serde(alias = "code", alias = "ticker", alias = "StockCode")]
    #[serde(rename = "Code")]
    code: String,
    #[serde(alias = "name", alias = "StockName_KR")]
    #[serde(rename = "Name")]
    name: String,
}

/// 숫자 코드의 앞자리 0 복원.
fn normalize_code(code: &str) -> String {
    let code = code.trim();
    if !code.is_empty() && code.len() < KR_CODE_LEN && code.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>width$}", code, width = KR_CODE_LEN)
    } else {
        code.to_string()
    }
}

/// CSV 텍스트에서 종목 목록을 파싱합니다 (UTF-8 BOM 허용).
pub fn parse_universe_csv(text: &str) -> Result<Vec<Instrument>> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let mut instruments = Vec::new();
    for row in reader.deserialize::<UniverseRow>() {
        let row = row?;
        let code = normalize_code(&row.code);
        if code.is_empty() {
            return Err(DataError::Parse(format!("빈 종목 코드: {}", row.name)));
        }
        instruments.push(Instrument::new(code, row.name.trim()));
    }
    Ok(instruments)
}

/// 로컬 CSV 종목 목록 Provider.
#[derive(Debug, Clone)]
pub struct CsvUniverseProvider {
    path: PathBuf,
}

impl CsvUniverseProvider {
    /// CSV 경로로 생성.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// CSV 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl UniverseProvider for CsvUniverseProvider {
    fn name(&self) -> &str {
        "CSV"
    }

    async fn fetch_universe(&self) -> Result<Vec<Instrument>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let instruments = parse_universe_csv(&text)?;
        info!("CSV 종목 목록 로드: {} ({}개)", self.path.display(), instruments.len());
        Ok(instruments)
    }
}
