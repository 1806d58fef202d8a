//! KOSPI/KOSDAQ 전종목 기술적 스캐너.
//!
//! 이 crate는 다음을 제공합니다:
//! - 종목 목록 로드 및 종목별 PearlScore 일괄 계산 (`scan`)
//! - 최신 점수 테이블 요약/필터/내보내기 (`report`)
//! - 요청 간격 제어를 위한 `Clock` 추상화

pub mod clock;
pub mod error;
pub mod modules;
pub mod stats;

pub use clock::{Clock, SystemClock};
pub use error::{Result, ScanError};
pub use stats::ScanStats;
