//! 스캔 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 스캔 작업 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanStats {
    /// 처리한 종목 수
    pub total: usize,
    /// 레코드 생성 수
    pub success: usize,
    /// 점수 계산 완료 (OK)
    pub scored: usize,
    /// 데이터 누락 (Data Missing)
    pub data_missing: usize,
    /// 에러 횟수 (조회 실패, 계산 실패)
    pub errors: usize,
    /// 빈 데이터 (조회 성공, 데이터 없음)
    pub empty: usize,
    /// 시가총액 조회 실패
    pub market_cap_failures: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ScanStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            scored = self.scored,
            data_missing = self.data_missing,
            errors = self.errors,
            empty = self.empty,
            market_cap_failures = self.market_cap_failures,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "스캔 완료"
        );
    }
}
