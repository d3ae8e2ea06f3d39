use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chip::ChipType;

/// 한 달을 730시간으로 본다.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// 칩 한 종류에 대한 고정 상수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChipProfile {
    /// 1MW 용량에 들어가는 GPU 수(패킹 밀도)
    pub gpus_per_mw: f64,
    /// GPU 1개 소비전력 [kW] (PUE 적용 전)
    pub gpu_power_kw: f64,
    /// GPU 1개 선불 구매가 [$]
    pub upfront_gpu_cost: f64,
    /// GPU 1개 설치비 [$]
    pub installation_cost: f64,
    /// GPU 1개 시간당 임대료 [$/h]
    pub gpu_hour_rate: f64,
}

/// 수익성 계산에 쓰이는 전역 설정. 계산 한 번 동안은 읽기 전용이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilitySettings {
    /// 전기 요금 [$/kWh]
    pub electricity_cost: f64,
    /// 데이터센터 운영비 [$/GPU/월]
    pub datacenter_overhead: f64,
    /// PUE 배수(>= 1)
    pub electrical_overhead: f64,
    /// 가동률 [%]
    pub utilization_rate: f64,
    /// 금융 조건이 없는 예전 배치에 적용하는 연이율 [%]
    pub interest_rate: f64,
    /// 칩별 상수 테이블
    pub chips: BTreeMap<ChipType, ChipProfile>,
}

/// 설정 조회/검증 오류.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("칩 프로필이 설정에 없습니다: {0}")]
    MissingChip(ChipType),
    #[error("설정 값이 범위를 벗어났습니다: {field} = {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl Default for ProfitabilitySettings {
    fn default() -> Self {
        let mut chips = BTreeMap::new();
        // 공랭식
        chips.insert(
            ChipType::B200,
            ChipProfile {
                gpus_per_mw: 532.0,
                gpu_power_kw: 1.7,
                upfront_gpu_cost: 46_000.0,
                installation_cost: 20.0,
                gpu_hour_rate: 3.65,
            },
        );
        // 수랭식
        chips.insert(
            ChipType::GB300,
            ChipProfile {
                gpus_per_mw: 432.0,
                gpu_power_kw: 2.1,
                upfront_gpu_cost: 80_000.0,
                installation_cost: 20.0,
                gpu_hour_rate: 5.50,
            },
        );
        Self {
            chips,
            electricity_cost: 0.0325,
            datacenter_overhead: 150.0,
            electrical_overhead: 1.5,
            utilization_rate: 90.0,
            interest_rate: 9.0,
        }
    }
}

impl ProfitabilitySettings {
    /// 칩 프로필을 조회한다. 없으면 기본값으로 대체하지 않고 오류를 낸다.
    pub fn profile(&self, chip: ChipType) -> Result<&ChipProfile, SettingsError> {
        self.chips.get(&chip).ok_or(SettingsError::MissingChip(chip))
    }

    /// 가동률을 0~1 비율로 반환한다.
    pub fn utilization_fraction(&self) -> f64 {
        self.utilization_rate / 100.0
    }

    /// GPU 1개가 한 달 동안 실제로 도는 시간.
    pub fn active_hours_per_month(&self) -> f64 {
        HOURS_PER_MONTH * self.utilization_fraction()
    }

    /// 값의 범위를 점검한다. 설정 로드 직후 한 번 호출한다.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check(
            "utilization_rate",
            self.utilization_rate,
            (0.0..=100.0).contains(&self.utilization_rate),
        )?;
        check(
            "electrical_overhead",
            self.electrical_overhead,
            self.electrical_overhead >= 1.0,
        )?;
        check(
            "electricity_cost",
            self.electricity_cost,
            self.electricity_cost >= 0.0,
        )?;
        check(
            "datacenter_overhead",
            self.datacenter_overhead,
            self.datacenter_overhead >= 0.0,
        )?;
        check("interest_rate", self.interest_rate, self.interest_rate >= 0.0)?;
        for profile in self.chips.values() {
            check("gpus_per_mw", profile.gpus_per_mw, profile.gpus_per_mw > 0.0)?;
            check("gpu_power_kw", profile.gpu_power_kw, profile.gpu_power_kw > 0.0)?;
            check(
                "upfront_gpu_cost",
                profile.upfront_gpu_cost,
                profile.upfront_gpu_cost >= 0.0,
            )?;
            check(
                "installation_cost",
                profile.installation_cost,
                profile.installation_cost >= 0.0,
            )?;
            check(
                "gpu_hour_rate",
                profile.gpu_hour_rate,
                profile.gpu_hour_rate >= 0.0,
            )?;
        }
        Ok(())
    }
}

fn check(field: &'static str, value: f64, ok: bool) -> Result<(), SettingsError> {
    // NaN은 모든 비교에서 false 이므로 여기서 함께 걸러진다.
    if ok {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { field, value })
    }
}
