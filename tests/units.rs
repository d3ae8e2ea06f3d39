//! 전력/에너지 단위 변환 회귀 테스트.
use gpu_profit_matrix::units::{convert_energy, convert_power, EnergyUnit, PowerUnit};

#[test]
fn megawatt_hour_to_gigajoule() {
    // 1 MWh = 3.6 GJ
    let gj = convert_energy(1.0, EnergyUnit::MegawattHour, EnergyUnit::Gigajoule);
    assert!((gj - 3.6).abs() < 1e-9);
}

#[test]
fn gpu_fleet_kw_to_mw() {
    // B200 4200개 x 1.7kW = 7.14MW
    let mw = convert_power(4200.0 * 1.7, PowerUnit::Kilowatt, PowerUnit::Megawatt);
    assert!((mw - 7.14).abs() < 1e-9);
    let w = convert_power(1.7, PowerUnit::Kilowatt, PowerUnit::Watt);
    assert!((w - 1700.0).abs() < 1e-9);
}
