//! 금액/비율 표기.

/// 금액을 $1.23B / $4.5M / $6.7K / $950 형태로 줄여 쓴다.
pub fn format_money(value: f64) -> String {
    if value == 0.0 {
        return "$0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("{sign}${:.2}B", abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{sign}${:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}${:.1}K", abs / 1_000.0)
    } else {
        format!("{sign}${abs:.0}")
    }
}

/// 배치율 표기. 정수면 소수점을 생략한다.
pub fn format_percent(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}%", value)
    } else {
        format!("{:.1}%", value)
    }
}
