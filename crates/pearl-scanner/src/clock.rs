//! 시간 추상화.
//!
//! 출력 파일 날짜와 요청 간 대기를 주입 가능한 `Clock`으로 분리합니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// 현재 날짜와 대기를 제공하는 시계.
#[async_trait]
pub trait Clock: Send + Sync {
    /// 기준 시간대의 오늘 날짜.
    fn today(&self) -> NaiveDate;

    /// 지정 시간만큼 대기.
    async fn sleep(&self, duration: Duration);
}

/// 실제 시스템 시계.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// 시간대를 지정하여 생성.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// 한국 표준시(KST) 시계.
    pub fn kst() -> Self {
        Self::new(chrono_tz::Asia::Seoul)
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_system_clock_sleep_advances_time() {
        let clock = SystemClock::kst();
        let start = tokio::time::Instant::now();

        clock.sleep(Duration::from_millis(500)).await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_kst_today_is_near_utc() {
        let today = SystemClock::kst().today();
        let utc = Utc::now().date_naive();
        assert!((today - utc).num_days().abs() <= 1);
    }
}
