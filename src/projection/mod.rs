//! 월별 현금흐름 예측 엔진과 포트폴리오 집계.

pub mod capacity;
pub mod engine;
pub mod portfolio;

use thiserror::Error;

use crate::finance::AmortizationError;
use crate::model::batch::BatchError;
use crate::model::SettingsError;

pub use capacity::{batch_mw_equivalent, site_utilization, SiteUtilization};
pub use engine::{lease_terms, project, project_breakdown, MonthBreakdown};
pub use portfolio::{arr, arr_breakdown, grand_total, totals, ArrBreakdown, ArrPoint, ArrRow};

/// 예측/집계 오류. 모두 입력 구성 문제이며 재시도 대상이 아니다.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Amortization(#[from] AmortizationError),
    #[error("배치 {index}의 예측 길이 {found}가 기준 길이 {expected}와 다릅니다")]
    TimelineMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("배치 수({batches})와 예측 수({projections})가 다릅니다")]
    BatchCountMismatch { batches: usize, projections: usize },
    #[error("{month}번째 달은 예측 범위({total_months}개월) 밖입니다")]
    MonthOutOfRange { month: usize, total_months: usize },
}
