/// Форматирует число с разделителями тысяч (запятыми)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string())
}

/// Форматирует денежную сумму, округляя до целых: `1,500,000 KRW`
pub fn format_amount(amount: f64, currency: &str) -> String {
    let rounded = amount.round();
    let digits = group_digits(&format!("{}", rounded.abs() as u64));
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} {}", sign, digits, currency)
}

fn group_digits(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_000_000.0, "KRW"), "1,000,000 KRW");
        assert_eq!(format_amount(-2500.4, "KRW"), "-2,500 KRW");
        assert_eq!(format_amount(0.0, "USD"), "0 USD");
    }
}
