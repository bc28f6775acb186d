//! 數字格式化（千分位）

use rust_decimal::Decimal;

/// 千分位整數，例如 `1234567` → `1,234,567`
pub fn thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// 帶正負號的千分位整數，例如 `-450` → `-450`、`30` → `+30`
pub fn signed_thousands(value: i64) -> String {
    let sign = if value < 0 { '-' } else { '+' };
    format!("{}{}", sign, group_digits(&value.unsigned_abs().to_string()))
}

/// 金額取整後加千分位
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let digits = rounded.abs().to_string();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", group_digits(&digits))
    } else {
        group_digits(&digits)
    }
}

/// 百分比，固定小數一位
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// 可能為空的平均值
pub fn optional_percent(value: Option<f64>) -> String {
    value.map(percent).unwrap_or_else(|| "-".to_string())
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_signed_thousands() {
        assert_eq!(signed_thousands(-450), "-450");
        assert_eq!(signed_thousands(1500), "+1,500");
        assert_eq!(signed_thousands(0), "+0");
        assert_eq!(signed_thousands(-12345), "-12,345");
    }

    #[test]
    fn test_money_rounds() {
        assert_eq!(money(Decimal::new(123456789, 2)), "1,234,568");
        assert_eq!(money(Decimal::from(-2500)), "-2,500");
        assert_eq!(money(Decimal::ZERO), "0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(38.04), "38.0%");
        assert_eq!(optional_percent(None), "-");
        assert_eq!(optional_percent(Some(12.26)), "12.3%");
    }
}
