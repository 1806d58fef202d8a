//! 설정 관리.
//!
//! 스캐너 설정은 다음 순서로 병합됩니다:
//! 1. 내장 기본값
//! 2. TOML 설정 파일 (기본: `config/scanner.toml`, 없어도 됨)
//! 3. `PEARL__` 접두사 환경 변수 (예: `PEARL__SCAN__REQUEST_DELAY_MS=1000`)

use crate::{PearlError, PearlResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 기본 설정 파일 경로 (확장자 제외).
pub const DEFAULT_CONFIG_PATH: &str = "config/scanner";

/// 스캐너 전체 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScannerConfig {
    /// 스캔(오케스트레이터) 설정
    #[serde(default)]
    pub scan: ScanSettings,
    /// 결과 파일 설정
    #[serde(default)]
    pub output: OutputSettings,
    /// 종목 유니버스 설정
    #[serde(default)]
    pub universe: UniverseSettings,
    /// 시가총액 부가정보 설정
    #[serde(default)]
    pub market_cap: MarketCapSettings,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 기준 시간대 (결과 파일 날짜 계산용)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scan: ScanSettings::default(),
            output: OutputSettings::default(),
            universe: UniverseSettings::default(),
            market_cap: MarketCapSettings::default(),
            logging: LoggingConfig::default(),
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

/// 스캔 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanSettings {
    /// 종목 간 딜레이 (밀리초, 데이터 소스 요청 제한 준수)
    pub request_delay_ms: u64,
    /// 진행 상황 로그 주기 (종목 수)
    pub progress_every: usize,
    /// 종목당 조회할 일봉 개수
    pub history_bars: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            request_delay_ms: 500,
            progress_every: 50,
            history_bars: 500,
        }
    }
}

impl ScanSettings {
    /// 종목 간 딜레이를 Duration으로 반환
    pub fn request_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_delay_ms)
    }
}

/// 결과 파일 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// 출력 디렉토리
    pub dir: PathBuf,
    /// 파일명 접두사 (`{prefix}_{YYYYMMDD}.csv`)
    pub file_prefix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            file_prefix: "kospi_kosdaq_technical".to_string(),
        }
    }
}

/// 종목 유니버스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UniverseSettings {
    /// KRX 시장 코드 (STK: KOSPI, KSQ: KOSDAQ)
    pub markets: Vec<String>,
    /// 로컬 CSV 유니버스 파일 (지정 시 KRX 대신 사용)
    pub file: Option<PathBuf>,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            markets: vec!["STK".to_string(), "KSQ".to_string()],
            file: None,
        }
    }
}

/// 시가총액 부가정보 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketCapSettings {
    /// 시가총액 조회 활성화
    pub enabled: bool,
}

impl Default for MarketCapSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl ScannerConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// `path`가 없으면 `config/scanner.toml`을 찾고, 파일이 없으면 기본값을 사용합니다.
    pub fn load(path: Option<&Path>) -> PearlResult<Self> {
        dotenvy::dotenv().ok();

        let file_source = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_PATH).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file_source)
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("PEARL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("universe.markets")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값 검증.
    pub fn validate(&self) -> PearlResult<()> {
        if self.scan.progress_every == 0 {
            return Err(PearlError::Config(
                "scan.progress_every는 0보다 커야 합니다".to_string(),
            ));
        }

        if self.scan.history_bars == 0 {
            return Err(PearlError::Config(
                "scan.history_bars는 0보다 커야 합니다".to_string(),
            ));
        }

        if self.universe.file.is_none() && self.universe.markets.is_empty() {
            return Err(PearlError::Config(
                "universe.markets 또는 universe.file 중 하나는 필요합니다".to_string(),
            ));
        }

        self.timezone()?;
        Ok(())
    }

    /// 기준 시간대를 파싱합니다.
    pub fn timezone(&self) -> PearlResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| PearlError::Config(format!("잘못된 시간대 '{}': {}", self.timezone, e)))
    }
}
