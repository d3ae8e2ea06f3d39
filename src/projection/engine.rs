use crate::deployment::schedule::FULLY_DEPLOYED;
use crate::finance::{loan_summary, ChipEconomics, LoanInput, LoanSummary};
use crate::model::{Batch, Financing, MonthData, ProfitabilitySettings, Timeline};
use crate::units::{convert_energy, EnergyUnit};

use super::ProjectionError;

/// 한 달치 현금흐름 상세. `MonthData`는 여기서 누적 값만 뽑은 것이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthBreakdown {
    /// 타임라인 인덱스
    pub index: u32,
    /// 달력 월(0=Jan)
    pub month: u32,
    pub year: i32,
    /// 누적 배치율 [%]
    pub percent_deployed: f64,
    /// 이번 달 새로 가동된 GPU 수 (회수면 음수)
    pub new_units: f64,
    /// 이번 달 가동 중인 GPU 수
    pub live_units: f64,
    pub revenue: f64,
    pub installation_cost: f64,
    /// 현금 구매가 또는 리스 상환액
    pub capital_cost: f64,
    pub datacenter_overhead: f64,
    pub electrical_cost: f64,
    /// PUE 포함 전력 사용량 [MWh]
    pub energy_mwh: f64,
    pub net: f64,
    /// 이번 달까지의 누적 손익
    pub cumulative: f64,
}

impl MonthBreakdown {
    fn idle(index: u32, timeline: &Timeline, cumulative: f64) -> Self {
        let (month, year) = timeline.calendar(index);
        Self {
            index,
            month,
            year,
            percent_deployed: 0.0,
            new_units: 0.0,
            live_units: 0.0,
            revenue: 0.0,
            installation_cost: 0.0,
            capital_cost: 0.0,
            datacenter_overhead: 0.0,
            electrical_cost: 0.0,
            energy_mwh: 0.0,
            net: 0.0,
            cumulative,
        }
    }

    /// 이번 달 비용 합계.
    pub fn total_costs(&self) -> f64 {
        self.installation_cost + self.capital_cost + self.datacenter_overhead + self.electrical_cost
    }

    pub fn to_month_data(&self) -> MonthData {
        MonthData {
            month: self.month,
            year: self.year,
            percent_deployed: self.percent_deployed,
            value: self.cumulative,
        }
    }
}

/// 리스 코호트. 배치된 달과 GPU 수.
struct Cohort {
    start: u32,
    units: f64,
}

/// 리스 배치의 (기간, GPU 1개당 상환 요약). 현금 구매면 None.
pub fn lease_terms(
    batch: &Batch,
    settings: &ProfitabilitySettings,
) -> Result<Option<(u32, LoanSummary)>, ProjectionError> {
    match batch.financing()? {
        Financing::Cash => Ok(None),
        Financing::Lease {
            term_months, apr, ..
        } => {
            let economics = ChipEconomics::resolve(batch.chip_type, settings)?;
            let loan = loan_summary(LoanInput {
                principal: economics.upfront_cost,
                annual_rate_percent: apr,
                term_months,
            })?;
            Ok(Some((term_months, loan)))
        }
    }
}

/// 배치 하나의 월별 누적 손익을 계산한다.
pub fn project(
    batch: &Batch,
    timeline: &Timeline,
    settings: &ProfitabilitySettings,
) -> Result<Vec<MonthData>, ProjectionError> {
    Ok(project_breakdown(batch, timeline, settings)?
        .iter()
        .map(MonthBreakdown::to_month_data)
        .collect())
}

/// 배치 하나의 월별 현금흐름을 비용 항목별로 계산한다.
///
/// 설치 시작 이전 달은 비용/매출 없이 0% 레코드를 낸다. 누적 배치율은 일정 델타의
/// 합을 0~100으로 자른 값이다. 설치비/구매가/리스 코호트는 누적이 이전 최고치를 넘어선
/// 만큼만 잡으므로, 회수했다가 다시 배치한 GPU에는 자본 비용이 다시 붙지 않는다.
pub fn project_breakdown(
    batch: &Batch,
    timeline: &Timeline,
    settings: &ProfitabilitySettings,
) -> Result<Vec<MonthBreakdown>, ProjectionError> {
    let economics = ChipEconomics::resolve(batch.chip_type, settings)?;
    let lease = lease_terms(batch, settings)?.map(|(term, loan)| (term, loan.monthly_payment));

    let quantity = batch.quantity as f64;
    let installation_index = batch.installation_index(timeline);
    let active_hours = settings.active_hours_per_month();

    let mut data = Vec::with_capacity(timeline.total_months as usize);
    let mut cohorts: Vec<Cohort> = Vec::new();
    let mut scheduled_total = 0.0;
    let mut cumulative_percent = 0.0;
    // 지금까지 한 번이라도 도달한 최대 누적 배치율. 그 아래로 회수했다가 다시 배치한 GPU는 이미 값을 치렀다.
    let mut paid_percent: f64 = 0.0;
    let mut cumulative_profit = 0.0;
    let mut started = false;

    for i in 0..timeline.total_months {
        if (i as i64) < installation_index {
            data.push(MonthBreakdown::idle(i, timeline, cumulative_profit));
            continue;
        }

        let delta: f64 = if started {
            batch.deployment_schedule.get(&i).copied().unwrap_or(0.0)
        } else {
            started = true;
            // 설치 이전 항목은 없어야 하지만, 있으면 첫 달로 합쳐서 누적이 일정 정의와 같게 한다.
            let early = batch.deployment_schedule.range(..i).count();
            if early > 0 {
                tracing::warn!(
                    batch = %batch.id,
                    entries = early,
                    "schedule entries before installation month folded into first month"
                );
            }
            batch.deployment_schedule.range(..=i).map(|(_, d)| d).sum()
        };
        scheduled_total += delta;
        let next_percent = scheduled_total.clamp(0.0, FULLY_DEPLOYED);
        let step_percent = next_percent - cumulative_percent;
        cumulative_percent = next_percent;

        let new_units = step_percent / 100.0 * quantity;
        let live_units = cumulative_percent / 100.0 * quantity;
        let added_units = (cumulative_percent - paid_percent).max(0.0) / 100.0 * quantity;
        paid_percent = paid_percent.max(cumulative_percent);

        let installation_cost = added_units * economics.installation_cost;
        let capital_cost = match lease {
            None => added_units * economics.upfront_cost,
            Some((term_months, payment_per_unit)) => {
                if added_units > 0.0 {
                    cohorts.push(Cohort {
                        start: i,
                        units: added_units,
                    });
                }
                cohorts
                    .iter()
                    .filter(|c| i - c.start < term_months)
                    .map(|c| c.units * payment_per_unit)
                    .sum()
            }
        };
        let datacenter_overhead = live_units * settings.datacenter_overhead;
        let energy_kwh =
            active_hours * live_units * economics.power_per_unit_kw * settings.electrical_overhead;
        let electrical_cost = energy_kwh * settings.electricity_cost;
        let revenue = live_units * active_hours * economics.gpu_hour_rate;

        let net =
            revenue - (installation_cost + capital_cost + datacenter_overhead + electrical_cost);
        cumulative_profit += net;

        let (month, year) = timeline.calendar(i);
        data.push(MonthBreakdown {
            index: i,
            month,
            year,
            percent_deployed: if batch.quantity == 0 {
                0.0
            } else {
                cumulative_percent
            },
            new_units,
            live_units,
            revenue,
            installation_cost,
            capital_cost,
            datacenter_overhead,
            electrical_cost,
            energy_mwh: convert_energy(
                energy_kwh,
                EnergyUnit::KilowattHour,
                EnergyUnit::MegawattHour,
            ),
            net,
            cumulative: cumulative_profit,
        });
    }

    tracing::debug!(
        batch = %batch.id,
        chip = %batch.chip_type,
        months = timeline.total_months,
        final_value = cumulative_profit,
        "batch projected"
    );
    Ok(data)
}
