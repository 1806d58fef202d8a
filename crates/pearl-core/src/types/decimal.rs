//! 정밀한 지표 계산을 위한 Decimal 유틸리티.
//!
//! 지표와 점수는 모두 `Decimal`로 계산하여 같은 입력에 대해 항상
//! 같은 결과(바이트 단위로 동일한 출력)를 보장합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 가격 타입.
pub type Price = Decimal;

/// 거래량 타입 (주 단위, 음수 불가).
pub type Volume = u64;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 가까운 짝수 쪽으로).
    ///
    /// 점수 테이블의 모든 값은 이 규칙으로 반올림됩니다. 1.125 → 1.12, 1.135 → 1.14.
    fn round_half_even(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn round_half_even(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
    }
}

/// 부호 함수 (-1, 0, 1).
pub fn sign(value: Decimal) -> i64 {
    if value > Decimal::ZERO {
        1
    } else if value < Decimal::ZERO {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_even() {
        assert_eq!(dec!(2.345).round_half_even(2), dec!(2.34));
        assert_eq!(dec!(2.335).round_half_even(2), dec!(2.34));
        assert_eq!(dec!(1.125).round_half_even(2), dec!(1.12));
        assert_eq!(dec!(0.625).round_half_even(2), dec!(0.62));
        assert_eq!(dec!(31.25).round_half_even(1), dec!(31.2));
        assert_eq!(dec!(-2.345).round_half_even(2), dec!(-2.34));
        // 경계가 아니면 일반 반올림과 같음
        assert_eq!(dec!(2.3451).round_half_even(2), dec!(2.35));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(dec!(3.2)), 1);
        assert_eq!(sign(dec!(-0.1)), -1);
        assert_eq!(sign(Decimal::ZERO), 0);
    }

    proptest! {
        #[test]
        fn prop_round_half_even_error_bound(mantissa in -10_000_000i64..10_000_000i64, scale in 0u32..6) {
            let value = Decimal::new(mantissa, scale);
            let rounded = value.round_half_even(2);
            prop_assert!((rounded - value).abs() <= dec!(0.005));
            prop_assert!(rounded.scale() <= 2);
        }
    }
}
