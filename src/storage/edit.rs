//! 포트폴리오 레코드 추가/수정/삭제. 모든 변경은 저장 전에 배치 검증을 통과해야 한다.

use crate::deployment::delivery_date;
use crate::model::batch::{default_batches, even_ramp};
use crate::model::{Batch, ChipType, FundingType, LeaseType, Site, SiteStatus, Timeline};

use super::{Portfolio, StorageError};

/// 새 배치 입력. 배치 일정은 설치 월부터 4개월 균등 램프로 시작한다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBatch {
    /// 없으면 "1000 B200s" 형태로 짓는다
    pub name: Option<String>,
    pub chip_type: ChipType,
    pub quantity: u32,
    pub installation_year: i32,
    /// 0=Jan
    pub installation_month: u32,
    pub site_id: Option<String>,
    pub funding_type: FundingType,
    /// 리스일 때만 쓴다 [개월]
    pub lease_term: u32,
    /// 리스일 때만 쓴다 [%]
    pub apr: f64,
}

/// 기존 배치의 부분 수정. `None`인 필드는 그대로 둔다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchEdit {
    pub name: Option<String>,
    pub chip_type: Option<ChipType>,
    pub quantity: Option<u32>,
    pub site_id: Option<String>,
    pub funding_type: Option<FundingType>,
    pub lease_term: Option<u32>,
    pub apr: Option<f64>,
}

/// 사이트 부분 수정.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteEdit {
    pub name: Option<String>,
    pub location: Option<String>,
    pub capacity_mw: Option<f64>,
    pub status: Option<SiteStatus>,
}

impl Portfolio {
    /// 아직 쓰이지 않은 `batch-N` id.
    pub fn next_batch_id(&self) -> String {
        (self.batches.len()..)
            .map(|n| format!("batch-{n}"))
            .find(|id| self.batch(id).is_none())
            .unwrap_or_default()
    }

    /// 새 배치를 만들어 끝에 붙인다.
    pub fn add_batch(
        &mut self,
        input: NewBatch,
        timeline: &Timeline,
    ) -> Result<&Batch, StorageError> {
        self.check_site(input.site_id.as_deref())?;
        let lease = input.funding_type == FundingType::Lease;
        let mut batch = Batch {
            id: self.next_batch_id(),
            name: input
                .name
                .unwrap_or_else(|| Batch::default_name(input.quantity, input.chip_type)),
            chip_type: input.chip_type,
            quantity: input.quantity,
            installation_month: input.installation_month,
            installation_year: input.installation_year,
            site_id: input.site_id,
            date_announced: None,
            delivery_date: None,
            funding_type: input.funding_type,
            lease_type: lease.then_some(LeaseType::Fmv),
            residual_cap: None,
            lease_term: lease.then_some(input.lease_term),
            apr: lease.then_some(input.apr),
            deployment_schedule: Default::default(),
        };
        batch.validate()?;
        batch.deployment_schedule = even_ramp(&batch, timeline);
        batch.delivery_date =
            delivery_date(&batch.deployment_schedule, timeline).map(|d| d.to_string());

        tracing::info!(
            batch = %batch.id,
            chip = %batch.chip_type,
            quantity = batch.quantity,
            "batch added"
        );
        self.batches.push(batch);
        Ok(&self.batches[self.batches.len() - 1])
    }

    /// 배치 필드를 부분 수정한다. 수량/칩이 바뀌고 이름을 주지 않으면 기본 이름으로 다시 짓는다.
    pub fn update_batch(&mut self, id: &str, edit: &BatchEdit) -> Result<&Batch, StorageError> {
        self.check_site(edit.site_id.as_deref())?;
        let index = self
            .batches
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StorageError::BatchNotFound(id.to_string()))?;

        let mut batch = self.batches[index].clone();
        let renamed = edit.quantity.is_some() || edit.chip_type.is_some();
        if let Some(chip_type) = edit.chip_type {
            batch.chip_type = chip_type;
        }
        if let Some(quantity) = edit.quantity {
            batch.quantity = quantity;
        }
        match &edit.name {
            Some(name) => batch.name = name.clone(),
            None if renamed => batch.name = Batch::default_name(batch.quantity, batch.chip_type),
            None => {}
        }
        if let Some(site_id) = &edit.site_id {
            batch.site_id = Some(site_id.clone());
        }
        if let Some(funding_type) = edit.funding_type {
            batch.funding_type = funding_type;
        }
        match batch.funding_type {
            FundingType::Cash => {
                batch.lease_type = None;
                batch.lease_term = None;
                batch.apr = None;
                batch.residual_cap = None;
            }
            FundingType::Lease => {
                batch.lease_type = Some(LeaseType::Fmv);
                batch.lease_term = edit.lease_term.or(batch.lease_term);
                batch.apr = edit.apr.or(batch.apr);
            }
        }
        batch.validate()?;

        tracing::info!(batch = %batch.id, "batch updated");
        self.batches[index] = batch;
        Ok(&self.batches[index])
    }

    /// 배치를 지우고 지운 레코드를 돌려준다.
    pub fn remove_batch(&mut self, id: &str) -> Result<Batch, StorageError> {
        let index = self
            .batches
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StorageError::BatchNotFound(id.to_string()))?;
        tracing::info!(batch = id, "batch removed");
        Ok(self.batches.remove(index))
    }

    /// 사이트 이름/위치/용량/상태를 고친다.
    pub fn edit_site(&mut self, id: &str, edit: &SiteEdit) -> Result<&Site, StorageError> {
        let site = self
            .sites
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StorageError::SiteNotFound(id.to_string()))?;
        if let Some(capacity_mw) = edit.capacity_mw {
            if !capacity_mw.is_finite() || capacity_mw < 0.0 {
                return Err(StorageError::InvalidSite {
                    site_id: id.to_string(),
                    field: "capacityMW",
                    value: capacity_mw,
                });
            }
            site.capacity_mw = capacity_mw;
        }
        if let Some(name) = &edit.name {
            site.name = name.clone();
        }
        if let Some(location) = &edit.location {
            site.location = location.clone();
        }
        if let Some(status) = edit.status {
            site.status = status;
        }
        tracing::info!(site = id, capacity_mw = site.capacity_mw, "site updated");
        Ok(site)
    }

    /// 배치를 기본 구성으로 되돌린다. 사이트 편집은 유지한다.
    pub fn reset_batches(&mut self, timeline: &Timeline, legacy_apr: f64) {
        self.batches = default_batches(timeline, legacy_apr);
        tracing::info!(batches = self.batches.len(), "batches reset to defaults");
    }

    fn check_site(&self, site_id: Option<&str>) -> Result<(), StorageError> {
        match site_id {
            Some(id) if !self.sites.iter().any(|s| s.id == id) => {
                Err(StorageError::SiteNotFound(id.to_string()))
            }
            _ => Ok(()),
        }
    }
}
