use serde::{Deserialize, Serialize};

/// 전력량 단위. 내부 기준은 킬로와트시(kWh)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    KilowattHour,
    MegawattHour,
    Gigajoule,
}

fn to_kwh(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::KilowattHour => value,
        EnergyUnit::MegawattHour => value * 1000.0,
        EnergyUnit::Gigajoule => value / 0.0036,
    }
}

fn from_kwh(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::KilowattHour => value,
        EnergyUnit::MegawattHour => value / 1000.0,
        EnergyUnit::Gigajoule => value * 0.0036,
    }
}

/// 전력량을 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    let kwh = to_kwh(value, from);
    from_kwh(kwh, to)
}
