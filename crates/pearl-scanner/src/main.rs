//! KOSPI/KOSDAQ 기술적 스캐너 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 전종목 스캔 (KRX 상장 목록 → 네이버 일봉 → output/kospi_kosdaq_technical_YYYYMMDD.csv)
//! pearl-scanner scan
//!
//! # 특정 종목만 스캔
//! pearl-scanner scan --codes 005930,000660 --no-market-cap
//!
//! # 최신 테이블 리포트 (상승 추세, 점수 60 이상)
//! pearl-scanner report --min-score 60 --trend up --export filtered.csv
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pearl_core::{init_logging, LogConfig, ScannerConfig, TrendArrow};
use pearl_data::{
    CsvUniverseProvider, KrxListingProvider, KrxMarketCapLookup, MarketCapProvider,
    NaverChartProvider, UniverseProvider,
};
use pearl_scanner::modules::{self, ReportFilter, ReportOptions, ScanOptions};
use pearl_scanner::SystemClock;
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "pearl-scanner")]
#[command(about = "KOSPI/KOSDAQ PearlScore 기술적 스캐너", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/scanner.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 전종목 스캔 후 점수 테이블 저장
    Scan {
        /// 로컬 종목 목록 CSV (Code,Name)
        #[arg(long)]
        universe_file: Option<PathBuf>,

        /// 특정 종목만 스캔 (쉼표로 구분, 예: "005930,000660")
        #[arg(long)]
        codes: Option<String>,

        /// 시가총액 조회 생략
        #[arg(long, default_value = "false")]
        no_market_cap: bool,

        /// 출력 디렉토리
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// 최신 점수 테이블 리포트
    Report {
        /// 최소 거래량 급증 비율
        #[arg(long, default_value = "1.0")]
        min_spike: Decimal,

        /// 최소 정규화 점수
        #[arg(long, default_value = "50.0")]
        min_score: Decimal,

        /// 추세 필터
        #[arg(long, value_enum, default_value = "all")]
        trend: TrendFilter,

        /// 테이블 파일 (기본: 출력 디렉토리의 최신 파일)
        #[arg(long)]
        table: Option<PathBuf>,

        /// 필터 결과 내보내기 경로
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TrendFilter {
    All,
    Up,
    Down,
    Flat,
}

impl TrendFilter {
    fn arrow(self) -> Option<TrendArrow> {
        match self {
            TrendFilter::All => None,
            TrendFilter::Up => Some(TrendArrow::Up),
            TrendFilter::Down => Some(TrendArrow::Down),
            TrendFilter::Flat => Some(TrendArrow::Flat),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 설정 로드
    let config = ScannerConfig::load(cli.config.as_deref())?;

    // 로깅 초기화
    init_logging(LogConfig::from_settings(&config.logging))?;

    match cli.command {
        Commands::Scan {
            universe_file,
            codes,
            no_market_cap,
            output_dir,
        } => {
            tracing::info!("Pearl Scanner 시작");

            // 종목 목록
            let universe_provider: Box<dyn UniverseProvider> =
                match universe_file.or_else(|| config.universe.file.clone()) {
                    Some(path) => Box::new(CsvUniverseProvider::new(path)),
                    None => Box::new(KrxListingProvider::new(config.universe.markets.clone())?),
                };
            let mut universe = modules::load_universe(universe_provider.as_ref()).await?;

            if let Some(codes) = codes {
                let codes: Vec<String> = codes
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                tracing::info!(count = codes.len(), "특정 종목 스캔");
                universe = modules::select_codes(universe, &codes);
            }

            // 일봉, 시가총액 Provider
            let series_provider = NaverChartProvider::new(config.scan.history_bars)?;
            let market_cap = if config.market_cap.enabled && !no_market_cap {
                Some(KrxMarketCapLookup::new(KrxListingProvider::new(
                    config.universe.markets.clone(),
                )?))
            } else {
                None
            };

            let clock = SystemClock::new(config.timezone()?);
            let options = ScanOptions::from_settings(&config.scan);
            let output_dir = output_dir.unwrap_or_else(|| config.output.dir.clone());

            let (path, outcome) = modules::scan_to_file(
                &universe,
                &series_provider,
                market_cap.as_ref().map(|m| m as &dyn MarketCapProvider),
                &clock,
                &options,
                &output_dir,
                &config.output.file_prefix,
            )
            .await?;

            outcome.stats.log_summary("PearlScore 스캔");
            println!("\n✅ 스캔 완료: {}개 레코드", outcome.records.len());
            println!("저장 위치: {}", path.display());
        }
        Commands::Report {
            min_spike,
            min_score,
            trend,
            table,
            export,
        } => {
            let options = ReportOptions {
                dir: config.output.dir.clone(),
                file_prefix: config.output.file_prefix.clone(),
                table,
                filter: ReportFilter {
                    min_spike,
                    min_score,
                    trend: trend.arrow(),
                },
                export,
            };
            modules::run_report(&options)?;
        }
    }

    Ok(())
}
