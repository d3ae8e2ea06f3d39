//! 전력/에너지 단위 정의 및 변환.

pub mod energy;
pub mod power;

pub use energy::{convert_energy, EnergyUnit};
pub use power::{convert_power, PowerUnit};
