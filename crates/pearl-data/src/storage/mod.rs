//! 저장소 모듈.
//!
//! - `score_table`: 스캔 결과 점수 테이블 CSV

pub mod score_table;
