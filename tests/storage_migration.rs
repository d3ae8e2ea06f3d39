//! 포트폴리오 저장/로드 및 스키마 업그레이드 테스트.
use std::fs;

use gpu_profit_matrix::model::batch::BatchError;
use gpu_profit_matrix::model::{ChipType, FundingType, LeaseType, Timeline};
use gpu_profit_matrix::storage::{
    load_or_default, load_portfolio, save_portfolio, upgrade, Portfolio, StorageError,
    CURRENT_VERSION,
};
use serde_json::json;

fn timeline() -> Timeline {
    Timeline {
        start_month: 0,
        start_year: 2026,
        total_months: 48,
    }
}

#[test]
fn legacy_array_gets_ramp_and_lease_terms() {
    let raw = json!([
        {
            "id": "b1",
            "name": "1000 B200s",
            "chipType": "B200",
            "quantity": 1000,
            "installationMonth": 2,
            "installationYear": 2026,
            "phases": [{ "month": 2, "percent": 50 }]
        }
    ]);
    let portfolio = upgrade(raw, &timeline(), 9.0).expect("upgrade");
    assert_eq!(portfolio.version, CURRENT_VERSION);
    assert_eq!(portfolio.sites.len(), 6);

    let batch = &portfolio.batches[0];
    assert_eq!(batch.chip_type, ChipType::B200);
    assert_eq!(batch.funding_type, FundingType::Lease);
    assert_eq!(batch.lease_type, Some(LeaseType::Fmv));
    assert_eq!(batch.lease_term, Some(36));
    assert_eq!(batch.apr, Some(9.0));
    let ramp: Vec<(u32, f64)> = batch.deployment_schedule.iter().map(|(m, p)| (*m, *p)).collect();
    assert_eq!(ramp, [(2, 25.0), (3, 25.0), (4, 25.0), (5, 25.0)]);
    assert_eq!(batch.delivery_date.as_deref(), Some("2026-03-01"));
}

#[test]
fn legacy_funding_fields_are_kept_when_present() {
    let raw = json!({
        "version": 1,
        "batches": [{
            "id": "cash",
            "chipType": "GB300",
            "quantity": 500,
            "installationMonth": 0,
            "installationYear": 2026,
            "fundingType": "Cash",
            "deploymentSchedule": { "0": 100.0 }
        }]
    });
    let portfolio = upgrade(raw, &timeline(), 12.0).expect("upgrade");
    let batch = &portfolio.batches[0];
    assert_eq!(batch.funding_type, FundingType::Cash);
    assert_eq!(batch.apr, None);
    assert_eq!(batch.deployment_schedule.get(&0), Some(&100.0));
    assert_eq!(batch.deployment_schedule.len(), 1);
}

#[test]
fn current_version_parses_camel_case() {
    let raw = json!({
        "version": 2,
        "batches": [{
            "id": "batch-9",
            "name": "GB300 NVL72 pod",
            "chipType": "GB300 NVL72",
            "quantity": 72,
            "installationMonth": 5,
            "installationYear": 2026,
            "siteId": "site-childress",
            "fundingType": "Lease",
            "leaseType": "FMV",
            "leaseTerm": 24,
            "apr": 7.5,
            "deploymentSchedule": { "5": 50.0, "6": 50.0 }
        }],
        "sites": [{
            "id": "site-x",
            "name": "X",
            "location": "Nowhere",
            "capacityMW": 12.5,
            "status": "under-construction"
        }]
    });
    let portfolio = upgrade(raw, &timeline(), 9.0).expect("upgrade");
    let batch = &portfolio.batches[0];
    assert_eq!(batch.chip_type, ChipType::Gb300Nvl72);
    assert_eq!(batch.lease_term, Some(24));
    assert_eq!(batch.site_id.as_deref(), Some("site-childress"));
    assert_eq!(batch.delivery_date, None);
    assert_eq!(portfolio.sites.len(), 1);
    assert_eq!(portfolio.sites[0].capacity_mw, 12.5);
}

#[test]
fn future_version_is_refused() {
    let raw = json!({ "version": 3, "batches": [] });
    assert!(matches!(
        upgrade(raw, &timeline(), 9.0),
        Err(StorageError::FutureVersion { found: 3, supported: 2 })
    ));
}

#[test]
fn non_container_json_is_refused() {
    assert!(matches!(
        upgrade(json!("batches"), &timeline(), 9.0),
        Err(StorageError::UnsupportedShape(_))
    ));
    assert!(matches!(
        upgrade(json!({ "version": 2 }), &timeline(), 9.0),
        Err(StorageError::UnsupportedShape(_))
    ));
}

#[test]
fn save_then_load_keeps_portfolio() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("portfolio.json");
    let portfolio = Portfolio::with_defaults(&timeline(), 9.0);

    save_portfolio(&path, &portfolio).expect("save");
    let loaded = load_portfolio(&path, &timeline(), 9.0).expect("load");
    assert_eq!(loaded, portfolio);
}

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("portfolio.json");

    let portfolio = load_or_default(&path, &Timeline::default(), 9.0).expect("load");
    assert!(path.exists());
    assert_eq!(portfolio.batches.len(), 8);
    assert_eq!(portfolio.batches[0].id, "batch-0");

    let written = fs::read_to_string(&path).expect("read");
    assert!(written.contains("\"deploymentSchedule\""));
    assert!(written.contains("\"fundingType\": \"Lease\""));
}

#[test]
fn replace_batch_swaps_by_id() {
    let mut portfolio = Portfolio::with_defaults(&timeline(), 9.0);
    let mut edited = portfolio.batch("batch-3").expect("batch-3").clone();
    edited.quantity = 1;
    assert!(portfolio.replace_batch(edited));
    assert_eq!(portfolio.batch("batch-3").map(|b| b.quantity), Some(1));

    let mut stranger = portfolio.batches[0].clone();
    stranger.id = "nope".into();
    assert!(!portfolio.replace_batch(stranger));
}

#[test]
fn out_of_range_installation_month_is_refused_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("portfolio.json");
    let raw = json!({
        "version": 2,
        "batches": [{
            "id": "bad",
            "chipType": "B200",
            "quantity": 100,
            "installationMonth": 12,
            "installationYear": 2026,
            "fundingType": "Cash",
            "deploymentSchedule": { "0": 100.0 }
        }]
    });
    fs::write(&path, raw.to_string()).expect("write");

    match load_portfolio(&path, &timeline(), 9.0) {
        Err(StorageError::InvalidBatch(BatchError::InstallationMonth { batch_id, month })) => {
            assert_eq!(batch_id, "bad");
            assert_eq!(month, 12);
        }
        other => panic!("expected InstallationMonth, got {other:?}"),
    }
}

#[test]
fn duplicate_batch_ids_are_refused() {
    let batch = json!({
        "id": "twin",
        "chipType": "B200",
        "quantity": 100,
        "installationMonth": 0,
        "installationYear": 2026,
        "fundingType": "Cash"
    });
    let raw = json!({ "version": 2, "batches": [batch.clone(), batch] });
    assert!(matches!(
        upgrade(raw, &timeline(), 9.0),
        Err(StorageError::DuplicateBatch(id)) if id == "twin"
    ));
}
