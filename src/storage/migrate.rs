use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::deployment::delivery_date;
use crate::model::batch::even_ramp;
use crate::model::site::default_sites;
use crate::model::{Batch, Timeline};

use super::{Portfolio, StorageError};

/// 현재 포트폴리오 스키마 버전.
///
/// - 1: 배치 배열만 저장, 배치에 배치 일정/자금 조달 필드가 없을 수 있음
/// - 2: `{ version, batches, sites }`, 배치 일정과 자금 조달 필드 필수
pub const CURRENT_VERSION: u32 = 2;

/// 예전 배치에 붙이는 리스 기간 [개월].
const LEGACY_LEASE_TERM: u32 = 36;

/// 저장된 JSON을 현재 스키마의 `Portfolio`로 올린다.
pub fn upgrade(
    raw: Value,
    timeline: &Timeline,
    legacy_apr: f64,
) -> Result<Portfolio, StorageError> {
    let (version, batches, sites) = match raw {
        Value::Array(batches) => (1, batches, None),
        Value::Object(mut map) => {
            let version = match map.get("version") {
                None => 1,
                Some(v) => v
                    .as_u64()
                    .ok_or_else(|| StorageError::UnsupportedShape(format!("version = {v}")))?,
            };
            if version > CURRENT_VERSION as u64 {
                return Err(StorageError::FutureVersion {
                    found: version,
                    supported: CURRENT_VERSION,
                });
            }
            let batches = match map.remove("batches") {
                Some(Value::Array(batches)) => batches,
                _ => return Err(StorageError::UnsupportedShape("batches 배열 없음".into())),
            };
            (version, batches, map.remove("sites"))
        }
        other => {
            return Err(StorageError::UnsupportedShape(format!(
                "최상위 값이 배열/객체가 아님: {other}"
            )))
        }
    };

    let sites = match sites {
        Some(value) => serde_json::from_value(value)?,
        None => default_sites(),
    };
    let batches = batches
        .into_iter()
        .map(|value| {
            if version < CURRENT_VERSION as u64 {
                upgrade_batch(value, timeline, legacy_apr)
            } else {
                Ok(serde_json::from_value(value)?)
            }
        })
        .collect::<Result<Vec<Batch>, StorageError>>()?;
    let mut seen = HashSet::new();
    for batch in &batches {
        batch.validate()?;
        if !seen.insert(batch.id.as_str()) {
            return Err(StorageError::DuplicateBatch(batch.id.clone()));
        }
    }

    if version < CURRENT_VERSION as u64 {
        tracing::info!(from = version, to = CURRENT_VERSION, "portfolio schema upgraded");
    }
    Ok(Portfolio {
        version: CURRENT_VERSION,
        batches,
        sites,
    })
}

/// 버전 1 배치 레코드를 현재 형태로 채운다.
fn upgrade_batch(value: Value, timeline: &Timeline, legacy_apr: f64) -> Result<Batch, StorageError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(StorageError::UnsupportedShape(format!(
                "배치가 객체가 아님: {other}"
            )))
        }
    };
    // 단계(phase) 기반 모델의 잔재
    map.remove("phases");

    if !map.contains_key("fundingType") {
        fill_legacy_lease(&mut map, legacy_apr);
    }

    let needs_ramp = matches!(map.get("deploymentSchedule"), None | Some(Value::Null));
    if needs_ramp {
        map.remove("deploymentSchedule");
    }

    let mut batch: Batch = serde_json::from_value(Value::Object(map))?;
    if needs_ramp {
        batch.deployment_schedule = even_ramp(&batch, timeline);
        tracing::warn!(
            batch = %batch.id,
            "legacy batch without deployment schedule back-filled with 4-month ramp"
        );
    }
    if batch.delivery_date.is_none() {
        batch.delivery_date =
            delivery_date(&batch.deployment_schedule, timeline).map(|d| d.to_string());
    }
    Ok(batch)
}

fn fill_legacy_lease(map: &mut Map<String, Value>, legacy_apr: f64) {
    map.insert("fundingType".into(), json!("Lease"));
    map.insert("leaseType".into(), json!("FMV"));
    map.entry("leaseTerm").or_insert(json!(LEGACY_LEASE_TERM));
    map.entry("apr").or_insert(json!(legacy_apr));
}
