use crate::model::{ChipType, ProfitabilitySettings, SettingsError};

/// 칩 종류별로 해석된 단가 묶음.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipEconomics {
    /// 시간당 임대료 [$/h]
    pub gpu_hour_rate: f64,
    /// GPU 1개 소비전력 [kW]
    pub power_per_unit_kw: f64,
    /// GPU 1개 구매가 [$]
    pub upfront_cost: f64,
    /// GPU 1개 설치비 [$]
    pub installation_cost: f64,
    /// 1MW당 GPU 수
    pub gpus_per_mw: f64,
}

impl ChipEconomics {
    /// 설정에서 칩 상수를 읽어온다. 프로필이 없으면 설정 오류.
    pub fn resolve(
        chip: ChipType,
        settings: &ProfitabilitySettings,
    ) -> Result<Self, SettingsError> {
        let profile = settings.profile(chip)?;
        Ok(Self {
            gpu_hour_rate: profile.gpu_hour_rate,
            power_per_unit_kw: profile.gpu_power_kw,
            upfront_cost: profile.upfront_gpu_cost,
            installation_cost: profile.installation_cost,
            gpus_per_mw: profile.gpus_per_mw,
        })
    }

    /// GPU 1개가 한 달 동안 버는 매출 [$].
    pub fn monthly_revenue_per_unit(&self, settings: &ProfitabilitySettings) -> f64 {
        settings.active_hours_per_month() * self.gpu_hour_rate
    }

    /// GPU 수를 MW 환산 용량으로 바꾼다(패킹 밀도 기준).
    pub fn mw_equivalent(&self, units: f64) -> f64 {
        units / self.gpus_per_mw
    }
}
