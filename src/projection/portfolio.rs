use serde::{Deserialize, Serialize};

use crate::finance::ChipEconomics;
use crate::model::{Batch, ChipType, MonthData, ProfitabilitySettings};

use super::ProjectionError;

/// ARR 시계열의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrPoint {
    pub value: f64,
}

/// 특정 월 ARR의 배치별 구성 행.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrRow {
    pub batch_id: String,
    pub batch_name: String,
    pub chip_type: ChipType,
    pub installation_year: i32,
    pub installation_month: u32,
    pub live_gpus: f64,
    pub monthly_revenue: f64,
    pub annual_revenue: f64,
}

/// 특정 월 ARR 구성. 행은 설치 시점이 이른 순서로 정렬된다.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrBreakdown {
    pub month_index: usize,
    pub rows: Vec<ArrRow>,
    pub total_live_gpus: f64,
    pub total_arr: f64,
}

/// 배치별 누적 손익을 월별로 합산한다. 포트폴리오 수준의 배치율은 의미가 없으므로 0으로 둔다.
pub fn totals(all_batch_data: &[Vec<MonthData>]) -> Result<Vec<MonthData>, ProjectionError> {
    let Some(first) = all_batch_data.first() else {
        return Ok(Vec::new());
    };
    check_lengths(all_batch_data)?;

    Ok(first
        .iter()
        .enumerate()
        .map(|(i, reference)| MonthData {
            month: reference.month,
            year: reference.year,
            percent_deployed: 0.0,
            value: all_batch_data.iter().map(|data| data[i].value).sum(),
        })
        .collect())
}

/// 마지막 달의 포트폴리오 누적 손익.
pub fn grand_total(totals: &[MonthData]) -> f64 {
    totals.last().map(|m| m.value).unwrap_or(0.0)
}

/// 월별 ARR: 해당 월 가동 GPU가 1년 내내 같은 요율로 돈다고 볼 때의 연 매출.
pub fn arr(
    batches: &[Batch],
    all_batch_data: &[Vec<MonthData>],
    settings: &ProfitabilitySettings,
) -> Result<Vec<ArrPoint>, ProjectionError> {
    check_pairing(batches, all_batch_data)?;
    let months = all_batch_data.first().map(Vec::len).unwrap_or(0);
    let rates = annual_rates(batches, settings)?;

    Ok((0..months)
        .map(|m| {
            let value = batches
                .iter()
                .zip(all_batch_data)
                .zip(&rates)
                .map(|((batch, data), rate)| live_gpus(batch, &data[m]) * rate)
                .sum();
            ArrPoint { value }
        })
        .collect())
}

/// 특정 월의 ARR을 배치별로 나눠 보여준다.
pub fn arr_breakdown(
    batches: &[Batch],
    all_batch_data: &[Vec<MonthData>],
    settings: &ProfitabilitySettings,
    month_index: usize,
) -> Result<ArrBreakdown, ProjectionError> {
    check_pairing(batches, all_batch_data)?;
    let months = all_batch_data.first().map(Vec::len).unwrap_or(0);
    if month_index >= months {
        return Err(ProjectionError::MonthOutOfRange {
            month: month_index,
            total_months: months,
        });
    }

    let mut rows = Vec::new();
    for (batch, data) in batches.iter().zip(all_batch_data) {
        let live = live_gpus(batch, &data[month_index]);
        if live <= 0.0 {
            continue;
        }
        let economics = ChipEconomics::resolve(batch.chip_type, settings)?;
        let monthly_revenue = live * economics.monthly_revenue_per_unit(settings);
        rows.push(ArrRow {
            batch_id: batch.id.clone(),
            batch_name: batch.name.clone(),
            chip_type: batch.chip_type,
            installation_year: batch.installation_year,
            installation_month: batch.installation_month,
            live_gpus: live,
            monthly_revenue,
            annual_revenue: monthly_revenue * 12.0,
        });
    }
    rows.sort_by_key(|r| (r.installation_year, r.installation_month));

    let total_live_gpus = rows.iter().map(|r| r.live_gpus).sum();
    let total_arr = rows.iter().map(|r| r.annual_revenue).sum();
    Ok(ArrBreakdown {
        month_index,
        rows,
        total_live_gpus,
        total_arr,
    })
}

fn live_gpus(batch: &Batch, month: &MonthData) -> f64 {
    if month.percent_deployed > 0.0 {
        month.percent_deployed / 100.0 * batch.quantity as f64
    } else {
        0.0
    }
}

/// 배치별 GPU 1개당 연 매출.
fn annual_rates(
    batches: &[Batch],
    settings: &ProfitabilitySettings,
) -> Result<Vec<f64>, ProjectionError> {
    batches
        .iter()
        .map(|batch| {
            let economics = ChipEconomics::resolve(batch.chip_type, settings)?;
            Ok(economics.monthly_revenue_per_unit(settings) * 12.0)
        })
        .collect()
}

fn check_pairing(
    batches: &[Batch],
    all_batch_data: &[Vec<MonthData>],
) -> Result<(), ProjectionError> {
    if batches.len() != all_batch_data.len() {
        return Err(ProjectionError::BatchCountMismatch {
            batches: batches.len(),
            projections: all_batch_data.len(),
        });
    }
    check_lengths(all_batch_data)
}

fn check_lengths(all_batch_data: &[Vec<MonthData>]) -> Result<(), ProjectionError> {
    let expected = all_batch_data.first().map(Vec::len).unwrap_or(0);
    match all_batch_data
        .iter()
        .enumerate()
        .find(|(_, data)| data.len() != expected)
    {
        Some((index, data)) => Err(ProjectionError::TimelineMismatch {
            index,
            expected,
            found: data.len(),
        }),
        None => Ok(()),
    }
}
