//! 계산 입력/출력 레코드 모음. UI나 저장소가 채워서 넘겨주는 형태 그대로 둔다.

pub mod batch;
pub mod chip;
pub mod month;
pub mod settings;
pub mod site;

pub use batch::{Batch, DeploymentSchedule, Financing, FundingType, LeaseType};
pub use chip::ChipType;
pub use month::{MonthData, Timeline};
pub use settings::{ChipProfile, ProfitabilitySettings, SettingsError};
pub use site::{Site, SiteStatus};
