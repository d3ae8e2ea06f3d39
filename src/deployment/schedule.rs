use std::ops::Bound::{Excluded, Unbounded};

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::{Batch, DeploymentSchedule, Timeline};

/// 누적 배치율 상한 [%].
pub const FULLY_DEPLOYED: f64 = 100.0;

/// 배송일로 보는 최소 누적 배치율 [%].
const DELIVERY_THRESHOLD: f64 = 1.0;

/// 배치 일정 편집 오류.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("배치 {batch_id}: {month}번째 달은 설치 시작({installation}) 이전입니다")]
    BeforeInstallation {
        batch_id: String,
        month: u32,
        installation: i64,
    },
    #[error("{month}번째 달은 타임라인({total_months}개월) 밖입니다")]
    OutsideTimeline { month: u32, total_months: u32 },
}

/// `month`까지(포함)의 델타 합을 0~100으로 자른 누적 배치율.
pub fn cumulative_at(schedule: &DeploymentSchedule, month: u32) -> f64 {
    let sum: f64 = schedule.range(..=month).map(|(_, delta)| delta).sum();
    sum.clamp(0.0, FULLY_DEPLOYED)
}

/// `month` 직전까지의 누적 배치율.
pub fn cumulative_before(schedule: &DeploymentSchedule, month: u32) -> f64 {
    let sum: f64 = schedule.range(..month).map(|(_, delta)| delta).sum();
    sum.clamp(0.0, FULLY_DEPLOYED)
}

/// 한 달의 델타를 바꾸고 이후 일정을 누적 0~100 범위에 맞게 재조정한 새 일정을 만든다.
///
/// 1. 요청 델타는 `[-이전누적, 100-이전누적]`으로 자른다. 이전 누적이 이미 100이면 0으로 고정된다.
/// 2. 편집 후 실제 누적(원시 합을 0~100으로 자른 값)이 100에 도달하면 이후 항목은 모두 지운다.
/// 3. 아니면 이후 델타 합이 남은 용량을 넘을 때 비율대로 압축한다.
/// 4. 마지막으로 이후 항목을 순서대로 훑어 어느 시점의 누적도 0~100을 벗어나지 않게 자른다.
pub fn apply_edit(
    schedule: &DeploymentSchedule,
    edit_month: u32,
    requested_delta: f64,
) -> DeploymentSchedule {
    // 저장된 앞부분이 범위를 벗어나 있을 수 있으므로 원시 합과 잘린 값을 따로 둔다.
    let raw_previous: f64 = schedule.range(..edit_month).map(|(_, delta)| delta).sum();
    let previous = raw_previous.clamp(0.0, FULLY_DEPLOYED);
    let requested = if requested_delta.is_finite() {
        requested_delta
    } else {
        tracing::warn!(edit_month, requested_delta, "non-finite deployment delta treated as 0");
        0.0
    };
    let clamped = clamp_step(previous, requested);

    let mut next = schedule.clone();
    next.insert(edit_month, clamped);
    let raw_at_edit = raw_previous + clamped;
    let at_edit = raw_at_edit.clamp(0.0, FULLY_DEPLOYED);

    if at_edit >= FULLY_DEPLOYED {
        // 완전 배치: 이후 램프 계획은 의미가 없다.
        next.retain(|month, _| *month <= edit_month);
        return next;
    }

    let remaining = FULLY_DEPLOYED - at_edit;
    let future_total: f64 = next
        .range((Excluded(edit_month), Unbounded))
        .map(|(_, delta)| delta)
        .sum();
    if future_total > remaining {
        let scale = remaining / future_total;
        for (_, delta) in next.range_mut((Excluded(edit_month), Unbounded)) {
            *delta *= scale;
        }
    }

    let mut running = raw_at_edit;
    for (_, delta) in next.range_mut((Excluded(edit_month), Unbounded)) {
        *delta = clamp_step(running.clamp(0.0, FULLY_DEPLOYED), *delta);
        running += *delta;
    }
    next
}

fn clamp_step(running: f64, delta: f64) -> f64 {
    if running >= FULLY_DEPLOYED {
        return 0.0;
    }
    delta.clamp(-running, FULLY_DEPLOYED - running)
}

/// 배치 레코드 단위 편집. 설치 이전/타임라인 밖의 달은 거부하고, 배송일을 다시 계산한 새 레코드를 돌려준다.
pub fn apply_batch_edit(
    batch: &Batch,
    timeline: &Timeline,
    month: u32,
    requested_delta: f64,
) -> Result<Batch, ScheduleError> {
    if month >= timeline.total_months {
        return Err(ScheduleError::OutsideTimeline {
            month,
            total_months: timeline.total_months,
        });
    }
    let installation = batch.installation_index(timeline);
    if (month as i64) < installation {
        return Err(ScheduleError::BeforeInstallation {
            batch_id: batch.id.clone(),
            month,
            installation,
        });
    }

    let mut updated = batch.clone();
    updated.deployment_schedule = apply_edit(&batch.deployment_schedule, month, requested_delta);
    updated.delivery_date =
        delivery_date(&updated.deployment_schedule, timeline).map(|d| d.to_string());
    tracing::debug!(
        batch = %batch.id,
        month,
        requested_delta,
        applied = updated.deployment_schedule.get(&month).copied().unwrap_or_default(),
        "deployment schedule edited"
    );
    Ok(updated)
}

/// 누적 배치율이 처음 1% 이상이 되는 달의 1일. 타임라인 안에서 도달하지 않으면 None.
pub fn delivery_date(schedule: &DeploymentSchedule, timeline: &Timeline) -> Option<NaiveDate> {
    (0..timeline.total_months)
        .find(|m| cumulative_at(schedule, *m) >= DELIVERY_THRESHOLD)
        .and_then(|m| timeline.first_day(m))
}
