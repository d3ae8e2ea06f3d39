use gpu_profit_matrix::format::{format_money, format_percent};

#[test]
fn money_is_abbreviated_by_magnitude() {
    assert_eq!(format_money(0.0), "$0");
    assert_eq!(format_money(950.0), "$950");
    assert_eq!(format_money(6_700.0), "$6.7K");
    assert_eq!(format_money(4_500_000.0), "$4.5M");
    assert_eq!(format_money(-1_230_000_000.0), "-$1.23B");
}

#[test]
fn percent_drops_trailing_zero() {
    assert_eq!(format_percent(20.0), "20%");
    assert_eq!(format_percent(33.333), "33.3%");
    assert_eq!(format_percent(100.0), "100%");
}
