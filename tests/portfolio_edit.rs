//! 포트폴리오 배치/사이트 추가·수정·삭제 테스트.
use gpu_profit_matrix::model::batch::BatchError;
use gpu_profit_matrix::model::{ChipType, FundingType, LeaseType, SiteStatus, Timeline};
use gpu_profit_matrix::storage::{BatchEdit, NewBatch, Portfolio, SiteEdit, StorageError};

fn timeline() -> Timeline {
    Timeline {
        start_month: 0,
        start_year: 2026,
        total_months: 48,
    }
}

fn portfolio() -> Portfolio {
    Portfolio::with_defaults(&timeline(), 9.0)
}

fn gb300_cash() -> NewBatch {
    NewBatch {
        name: None,
        chip_type: ChipType::GB300,
        quantity: 2000,
        installation_year: 2026,
        installation_month: 5,
        site_id: Some("site-sweetwater-1".into()),
        funding_type: FundingType::Cash,
        lease_term: 36,
        apr: 9.0,
    }
}

#[test]
fn added_batch_gets_ramp_and_fresh_id() {
    let mut p = portfolio();
    let added = p.add_batch(gb300_cash(), &timeline()).expect("add").clone();

    assert_eq!(added.id, "batch-8");
    assert_eq!(added.name, "2000 GB300s");
    assert_eq!(added.funding_type, FundingType::Cash);
    assert_eq!((added.lease_type, added.lease_term, added.apr), (None, None, None));
    let ramp: Vec<(u32, f64)> = added.deployment_schedule.iter().map(|(m, p)| (*m, *p)).collect();
    assert_eq!(ramp, [(5, 25.0), (6, 25.0), (7, 25.0), (8, 25.0)]);
    assert_eq!(added.delivery_date.as_deref(), Some("2026-06-01"));
    assert_eq!(p.batches.len(), 9);
}

#[test]
fn added_lease_batch_carries_terms() {
    let mut p = portfolio();
    let input = NewBatch {
        funding_type: FundingType::Lease,
        lease_term: 24,
        apr: 7.5,
        ..gb300_cash()
    };
    let added = p.add_batch(input, &timeline()).expect("add");
    assert_eq!(added.lease_type, Some(LeaseType::Fmv));
    assert_eq!(added.lease_term, Some(24));
    assert_eq!(added.apr, Some(7.5));
}

#[test]
fn add_rejects_unknown_site_and_bad_month() {
    let mut p = portfolio();
    let unknown = NewBatch {
        site_id: Some("site-atlantis".into()),
        ..gb300_cash()
    };
    assert!(matches!(
        p.add_batch(unknown, &timeline()),
        Err(StorageError::SiteNotFound(id)) if id == "site-atlantis"
    ));

    let bad_month = NewBatch {
        installation_month: 12,
        ..gb300_cash()
    };
    assert!(matches!(
        p.add_batch(bad_month, &timeline()),
        Err(StorageError::InvalidBatch(BatchError::InstallationMonth { month: 12, .. }))
    ));

    let zero_term = NewBatch {
        funding_type: FundingType::Lease,
        lease_term: 0,
        ..gb300_cash()
    };
    assert!(matches!(
        p.add_batch(zero_term, &timeline()),
        Err(StorageError::InvalidBatch(BatchError::InvalidTerm { field: "leaseTerm", .. }))
    ));
    assert_eq!(p.batches.len(), 8);
}

#[test]
fn update_renames_on_quantity_change_and_switches_funding() {
    let mut p = portfolio();
    let schedule_before = p.batch("batch-2").expect("batch-2").deployment_schedule.clone();
    let edit = BatchEdit {
        quantity: Some(6000),
        funding_type: Some(FundingType::Cash),
        ..BatchEdit::default()
    };
    let updated = p.update_batch("batch-2", &edit).expect("update");
    assert_eq!(updated.name, "6000 B200s");
    assert_eq!(updated.quantity, 6000);
    assert_eq!((updated.lease_type, updated.lease_term, updated.apr), (None, None, None));
    // 일정은 비율이므로 그대로 남는다.
    assert_eq!(updated.deployment_schedule, schedule_before);

    let named = BatchEdit {
        name: Some("Childress pod".into()),
        chip_type: Some(ChipType::GB300),
        ..BatchEdit::default()
    };
    assert_eq!(p.update_batch("batch-2", &named).expect("rename").name, "Childress pod");
}

#[test]
fn switching_to_lease_needs_terms() {
    let mut p = portfolio();
    let to_cash = BatchEdit {
        funding_type: Some(FundingType::Cash),
        ..BatchEdit::default()
    };
    p.update_batch("batch-0", &to_cash).expect("cash");

    let bare_lease = BatchEdit {
        funding_type: Some(FundingType::Lease),
        ..BatchEdit::default()
    };
    assert!(matches!(
        p.update_batch("batch-0", &bare_lease),
        Err(StorageError::InvalidBatch(BatchError::MissingLeaseTerm { .. }))
    ));
    // 실패한 수정은 레코드를 바꾸지 않는다.
    assert_eq!(p.batch("batch-0").map(|b| b.funding_type), Some(FundingType::Cash));

    let full_lease = BatchEdit {
        funding_type: Some(FundingType::Lease),
        lease_term: Some(48),
        apr: Some(11.0),
        ..BatchEdit::default()
    };
    let leased = p.update_batch("batch-0", &full_lease).expect("lease");
    assert_eq!(leased.lease_term, Some(48));
    assert_eq!(leased.apr, Some(11.0));
    assert_eq!(leased.lease_type, Some(LeaseType::Fmv));
}

#[test]
fn remove_batch_and_reuse_ids() {
    let mut p = portfolio();
    let removed = p.remove_batch("batch-3").expect("remove");
    assert_eq!(removed.quantity, 5000);
    assert_eq!(p.batches.len(), 7);
    assert!(p.batch("batch-3").is_none());
    assert!(matches!(
        p.remove_batch("batch-3"),
        Err(StorageError::BatchNotFound(_))
    ));
    assert!(matches!(
        p.update_batch("batch-3", &BatchEdit::default()),
        Err(StorageError::BatchNotFound(_))
    ));

    // batch-7까지 남아 있으므로 새 id는 겹치지 않는다.
    let added = p.add_batch(gb300_cash(), &timeline()).expect("add");
    assert_eq!(added.id, "batch-8");
}

#[test]
fn site_edit_changes_capacity_and_status() {
    let mut p = portfolio();
    let edit = SiteEdit {
        capacity_mw: Some(900.0),
        status: Some(SiteStatus::Operating),
        ..SiteEdit::default()
    };
    let site = p.edit_site("site-childress", &edit).expect("edit");
    assert_eq!(site.capacity_mw, 900.0);
    assert_eq!(site.status, SiteStatus::Operating);
    assert_eq!(site.name, "Childress");

    let negative = SiteEdit {
        capacity_mw: Some(-5.0),
        name: Some("ignored".into()),
        ..SiteEdit::default()
    };
    assert!(matches!(
        p.edit_site("site-childress", &negative),
        Err(StorageError::InvalidSite { field: "capacityMW", .. })
    ));
    let childress = p.sites.iter().find(|s| s.id == "site-childress");
    assert_eq!(childress.map(|s| s.name.as_str()), Some("Childress"));
    assert!(matches!(
        p.edit_site("site-nowhere", &SiteEdit::default()),
        Err(StorageError::SiteNotFound(_))
    ));
}

#[test]
fn reset_restores_batches_but_keeps_sites() {
    let mut p = portfolio();
    p.remove_batch("batch-0").expect("remove");
    p.add_batch(gb300_cash(), &timeline()).expect("add");
    p.edit_site(
        "site-mackenzie",
        &SiteEdit {
            capacity_mw: Some(95.0),
            ..SiteEdit::default()
        },
    )
    .expect("site");

    p.reset_batches(&timeline(), 9.0);
    assert_eq!(p.batches, portfolio().batches);
    let mackenzie = p.sites.iter().find(|s| s.id == "site-mackenzie").expect("site");
    assert_eq!(mackenzie.capacity_mw, 95.0);
}

#[test]
fn labels_parse_from_cli_text() {
    assert_eq!("gb300-nvl72".parse::<ChipType>(), Ok(ChipType::Gb300Nvl72));
    assert_eq!("GB200 NVL72".parse::<ChipType>(), Ok(ChipType::Gb200Nvl72));
    assert_eq!("b200".parse::<ChipType>(), Ok(ChipType::B200));
    assert!("A100".parse::<ChipType>().is_err());
    assert_eq!("Cash".parse::<FundingType>(), Ok(FundingType::Cash));
    assert_eq!(
        "under_construction".parse::<SiteStatus>(),
        Ok(SiteStatus::UnderConstruction)
    );
}
