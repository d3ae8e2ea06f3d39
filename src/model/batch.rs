use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chip::ChipType;
use super::month::Timeline;

/// 타임라인 인덱스 → 그 달에 새로 배치(또는 회수)되는 비율 [%] 델타.
pub type DeploymentSchedule = BTreeMap<u32, f64>;

/// 자금 조달 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingType {
    Cash,
    Lease,
}

impl FromStr for FundingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(FundingType::Cash),
            "lease" => Ok(FundingType::Lease),
            _ => Err(format!("Invalid funding '{s}'. Valid options: cash, lease")),
        }
    }
}

/// 리스 종류. 현재는 공정가(FMV) 리스만 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseType {
    #[serde(rename = "FMV")]
    Fmv,
}

/// 배치 레코드에서 해석한 금융 조건.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Financing {
    /// 배치되는 달에 구매가 전액 지급
    Cash,
    /// 배치된 달부터 `term_months` 동안 원리금 균등 상환
    Lease {
        term_months: u32,
        apr: f64,
        residual_cap: Option<f64>,
    },
}

/// 배치 레코드 자체가 불완전할 때의 오류.
#[derive(Debug, Error, PartialEq)]
pub enum BatchError {
    #[error("리스 배치 {batch_id}에 리스 기간(leaseTerm)이 없습니다")]
    MissingLeaseTerm { batch_id: String },
    #[error("리스 배치 {batch_id}에 연이율(apr)이 없습니다")]
    MissingApr { batch_id: String },
    #[error("배치 {batch_id}의 설치 월 {month}은 0~11 범위가 아닙니다")]
    InstallationMonth { batch_id: String, month: u32 },
    #[error("배치 {batch_id}의 {field} 값 {value}이 올바르지 않습니다")]
    InvalidTerm {
        batch_id: String,
        field: &'static str,
        value: f64,
    },
}

/// 한 번의 GPU 구매/리스 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub chip_type: ChipType,
    /// 이 배치로 최종 배치될 GPU 총 수
    pub quantity: u32,
    /// 배치가 시작될 수 있는 첫 달(0=Jan)
    pub installation_month: u32,
    pub installation_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_announced: Option<String>,
    /// 누적 배치율이 처음 1% 이상이 되는 달 (ISO 날짜)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    pub funding_type: FundingType,
    #[serde(default)]
    pub lease_type: Option<LeaseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_term: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apr: Option<f64>,
    #[serde(default)]
    pub deployment_schedule: DeploymentSchedule,
}

impl Batch {
    /// 설치 시작 월을 타임라인 인덱스로 표현한다.
    pub fn installation_index(&self, timeline: &Timeline) -> i64 {
        timeline.index_of(self.installation_year, self.installation_month)
    }

    /// "4000 B200s" 형태의 기본 이름.
    pub fn default_name(quantity: u32, chip_type: ChipType) -> String {
        format!("{quantity} {chip_type}s")
    }

    /// 저장소에 들어가기 전 레코드 점검. 설치 월 범위와 리스 조건을 본다.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.installation_month > 11 {
            return Err(BatchError::InstallationMonth {
                batch_id: self.id.clone(),
                month: self.installation_month,
            });
        }
        if let Financing::Lease {
            term_months, apr, ..
        } = self.financing()?
        {
            if term_months == 0 {
                return Err(self.invalid_term("leaseTerm", 0.0));
            }
            if !apr.is_finite() || apr < 0.0 {
                return Err(self.invalid_term("apr", apr));
            }
        }
        Ok(())
    }

    fn invalid_term(&self, field: &'static str, value: f64) -> BatchError {
        BatchError::InvalidTerm {
            batch_id: self.id.clone(),
            field,
            value,
        }
    }

    /// 자금 조달 필드를 해석한다. 리스인데 조건이 비어 있으면 오류.
    pub fn financing(&self) -> Result<Financing, BatchError> {
        match self.funding_type {
            FundingType::Cash => Ok(Financing::Cash),
            FundingType::Lease => {
                let term_months = self.lease_term.ok_or_else(|| BatchError::MissingLeaseTerm {
                    batch_id: self.id.clone(),
                })?;
                let apr = self.apr.ok_or_else(|| BatchError::MissingApr {
                    batch_id: self.id.clone(),
                })?;
                Ok(Financing::Lease {
                    term_months,
                    apr,
                    residual_cap: self.residual_cap,
                })
            }
        }
    }
}

/// 기본 배치 구성(2025년 9월 ~ 2026년 4월, B200).
pub fn default_batches(timeline: &Timeline, legacy_apr: f64) -> Vec<Batch> {
    let config: [(u32, i32, u32, &str); 8] = [
        (8, 2025, 4000, "site-prince-george"),
        (9, 2025, 4500, "site-prince-george"),
        (10, 2025, 5000, "site-prince-george"),
        (11, 2025, 5000, "site-prince-george"),
        (0, 2026, 5500, "site-prince-george"),
        (1, 2026, 5500, "site-childress"),
        (2, 2026, 5500, "site-childress"),
        (3, 2026, 5500, "site-childress"),
    ];
    config
        .iter()
        .enumerate()
        .map(|(i, &(month, year, quantity, site_id))| {
            let mut batch = Batch {
                id: format!("batch-{i}"),
                name: Batch::default_name(quantity, ChipType::B200),
                chip_type: ChipType::B200,
                quantity,
                installation_month: month,
                installation_year: year,
                site_id: Some(site_id.to_string()),
                date_announced: None,
                delivery_date: None,
                funding_type: FundingType::Lease,
                lease_type: Some(LeaseType::Fmv),
                residual_cap: None,
                lease_term: Some(36),
                apr: Some(legacy_apr),
                deployment_schedule: DeploymentSchedule::new(),
            };
            batch.deployment_schedule = even_ramp(&batch, timeline);
            batch
        })
        .collect()
}

/// 설치 월부터 4개월 동안 25%씩 배치하는 기본 램프.
pub fn even_ramp(batch: &Batch, timeline: &Timeline) -> DeploymentSchedule {
    const RAMP_MONTHS: i64 = 4;
    let start = batch.installation_index(timeline);
    (start..start + RAMP_MONTHS)
        .filter(|m| *m >= 0)
        .map(|m| (m as u32, 100.0 / RAMP_MONTHS as f64))
        .collect()
}
