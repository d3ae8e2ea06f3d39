use crate::finance::ChipEconomics;
use crate::model::{Batch, MonthData, ProfitabilitySettings, Site};
use crate::units::{convert_power, PowerUnit};

use super::ProjectionError;

/// 특정 월의 사이트별 용량 사용 현황.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteUtilization {
    pub site_id: String,
    pub site_name: String,
    pub capacity_mw: f64,
    /// 가동 GPU를 패킹 밀도(GPU/MW)로 환산한 용량 [MW]
    pub mw_in_use: f64,
    /// 가동 GPU의 IT 전력 [MW] (PUE 제외)
    pub it_load_mw: f64,
    /// `mw_in_use / capacity_mw` [%]
    pub utilization_percent: f64,
}

/// 배치 전체 수량의 MW 환산 용량.
pub fn batch_mw_equivalent(
    batch: &Batch,
    settings: &ProfitabilitySettings,
) -> Result<f64, ProjectionError> {
    let economics = ChipEconomics::resolve(batch.chip_type, settings)?;
    Ok(economics.mw_equivalent(batch.quantity as f64))
}

/// 사이트마다 해당 월 가동 중인 배치들의 MW 사용량을 합산한다. 사이트가 없는 배치는 건너뛴다.
pub fn site_utilization(
    sites: &[Site],
    batches: &[Batch],
    all_batch_data: &[Vec<MonthData>],
    settings: &ProfitabilitySettings,
    month_index: usize,
) -> Result<Vec<SiteUtilization>, ProjectionError> {
    if batches.len() != all_batch_data.len() {
        return Err(ProjectionError::BatchCountMismatch {
            batches: batches.len(),
            projections: all_batch_data.len(),
        });
    }

    let mut report: Vec<SiteUtilization> = sites
        .iter()
        .map(|site| SiteUtilization {
            site_id: site.id.clone(),
            site_name: site.name.clone(),
            capacity_mw: site.capacity_mw,
            mw_in_use: 0.0,
            it_load_mw: 0.0,
            utilization_percent: 0.0,
        })
        .collect();

    for (batch, data) in batches.iter().zip(all_batch_data) {
        let Some(site_id) = batch.site_id.as_deref() else {
            continue;
        };
        let Some(entry) = report.iter_mut().find(|s| s.site_id == site_id) else {
            tracing::debug!(batch = %batch.id, site = site_id, "batch references unknown site");
            continue;
        };
        let Some(month) = data.get(month_index) else {
            return Err(ProjectionError::MonthOutOfRange {
                month: month_index,
                total_months: data.len(),
            });
        };
        let economics = ChipEconomics::resolve(batch.chip_type, settings)?;
        let live = month.percent_deployed / 100.0 * batch.quantity as f64;
        entry.mw_in_use += economics.mw_equivalent(live);
        entry.it_load_mw += convert_power(
            live * economics.power_per_unit_kw,
            PowerUnit::Kilowatt,
            PowerUnit::Megawatt,
        );
    }

    for entry in &mut report {
        entry.utilization_percent = if entry.capacity_mw > 0.0 {
            entry.mw_in_use / entry.capacity_mw * 100.0
        } else {
            0.0
        };
    }
    Ok(report)
}
