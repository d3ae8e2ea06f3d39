//! 포트폴리오(배치/사이트) JSON 저장소. 로드할 때 한 번 스키마를 최신으로 올린다.

pub mod edit;
pub mod migrate;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::batch::{default_batches, BatchError};
use crate::model::site::default_sites;
use crate::model::{Batch, Site, Timeline};

pub use edit::{BatchEdit, NewBatch, SiteEdit};
pub use migrate::{upgrade, CURRENT_VERSION};

/// 저장소 입출력 오류.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("포트폴리오 JSON 오류: {0}")]
    Json(#[from] serde_json::Error),
    #[error("지원하지 않는 포트폴리오 형식: {0}")]
    UnsupportedShape(String),
    #[error("알 수 없는 스키마 버전 {found} (지원: {supported} 이하)")]
    FutureVersion { found: u64, supported: u32 },
    #[error("잘못된 배치 레코드: {0}")]
    InvalidBatch(#[from] BatchError),
    #[error("이미 있는 배치 id: {0}")]
    DuplicateBatch(String),
    #[error("배치를 찾을 수 없습니다: {0}")]
    BatchNotFound(String),
    #[error("사이트를 찾을 수 없습니다: {0}")]
    SiteNotFound(String),
    #[error("사이트 {site_id}의 {field} 값 {value}이 올바르지 않습니다")]
    InvalidSite {
        site_id: String,
        field: &'static str,
        value: f64,
    },
}

/// 저장 파일에 들어가는 포트폴리오 전체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub version: u32,
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub sites: Vec<Site>,
}

impl Portfolio {
    /// 기본 배치/사이트로 채운 포트폴리오.
    pub fn with_defaults(timeline: &Timeline, legacy_apr: f64) -> Self {
        Self {
            version: CURRENT_VERSION,
            batches: default_batches(timeline, legacy_apr),
            sites: default_sites(),
        }
    }

    pub fn batch(&self, id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }

    /// 같은 id의 배치를 통째로 교체한다. 없으면 false.
    pub fn replace_batch(&mut self, batch: Batch) -> bool {
        match self.batches.iter_mut().find(|b| b.id == batch.id) {
            Some(slot) => {
                *slot = batch;
                true
            }
            None => false,
        }
    }
}

/// 포트폴리오 파일을 읽고 최신 스키마로 올린다.
pub fn load_portfolio(
    path: &Path,
    timeline: &Timeline,
    legacy_apr: f64,
) -> Result<Portfolio, StorageError> {
    let content = fs::read_to_string(path)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;
    let portfolio = upgrade(raw, timeline, legacy_apr)?;
    tracing::info!(
        path = %path.display(),
        batches = portfolio.batches.len(),
        sites = portfolio.sites.len(),
        "portfolio loaded"
    );
    Ok(portfolio)
}

/// 파일이 있으면 읽고, 없으면 기본 포트폴리오를 만들어 저장한다.
pub fn load_or_default(
    path: &Path,
    timeline: &Timeline,
    legacy_apr: f64,
) -> Result<Portfolio, StorageError> {
    if path.exists() {
        load_portfolio(path, timeline, legacy_apr)
    } else {
        let portfolio = Portfolio::with_defaults(timeline, legacy_apr);
        save_portfolio(path, &portfolio)?;
        Ok(portfolio)
    }
}

/// 포트폴리오를 JSON으로 저장한다.
pub fn save_portfolio(path: &Path, portfolio: &Portfolio) -> Result<(), StorageError> {
    let content = serde_json::to_string_pretty(portfolio)?;
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), batches = portfolio.batches.len(), "portfolio saved");
    Ok(())
}
