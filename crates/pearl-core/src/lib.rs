//! # Pearl Core
//!
//! Pearl 스크리너의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 스크리너 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일봉 OHLCV 시계열
//! - 종목(코드, 종목명) 정의
//! - 지표 스냅샷 및 PearlScore 결과 레코드
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
