//! 금액 표시용 Decimal 유틸리티.

use rust_decimal::{Decimal, RoundingStrategy};

/// 표시용 Decimal 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 천 단위 구분 기호를 넣은 문자열 (예: "1,234,500").
    ///
    /// 소수부가 있으면 그대로 유지합니다.
    fn to_grouped_string(&self) -> String;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_grouped_string(&self) -> String {
        let plain = self.normalize().to_string();
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain.as_str()),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        match frac_part {
            Some(f) => format!("{}{}.{}", sign, grouped, f),
            None => format!("{}{}", sign, grouped),
        }
    }
}

/// 원화 금액 표시 (예: "71,500원", "-1,200원").
pub fn format_won(amount: Decimal) -> String {
    format!("{}원", amount.to_grouped_string())
}

/// 시가총액을 표시 단위로 나눈 값 (소수점 첫째 자리 반올림).
///
/// `divisor`가 0이면 원래 값을 그대로 돌려줍니다.
pub fn scale_cap(market_cap: Decimal, divisor: Decimal) -> Decimal {
    if divisor.is_zero() {
        return market_cap;
    }
    (market_cap / divisor).round_half_up(1)
}

/// 시가총액 라벨 (예: "412.3조").
pub fn format_cap(market_cap: Decimal, divisor: Decimal, unit: &str) -> String {
    format!("{:.1}{}", scale_cap(market_cap, divisor), unit)
}
