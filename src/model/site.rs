use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 사이트 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteStatus {
    Operating,
    UnderConstruction,
    Secured,
}

impl FromStr for SiteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "operating" => Ok(SiteStatus::Operating),
            "under-construction" => Ok(SiteStatus::UnderConstruction),
            "secured" => Ok(SiteStatus::Secured),
            _ => Err(format!(
                "Invalid site status '{s}'. Valid options: operating, under-construction, secured"
            )),
        }
    }
}

/// 배치가 설치되는 데이터센터 사이트. 재무 계산에는 쓰이지 않고 용량 활용 표시에만 쓴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub location: String,
    /// 사이트 용량 [MW]
    #[serde(rename = "capacityMW")]
    pub capacity_mw: f64,
    pub status: SiteStatus,
}

/// 공개 자료 기준 기본 사이트 목록.
pub fn default_sites() -> Vec<Site> {
    let site = |id: &str, name: &str, location: &str, capacity_mw: f64, status| Site {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        capacity_mw,
        status,
    };
    vec![
        site("site-canal-flats", "Canal Flats", "British Columbia", 30.0, SiteStatus::Operating),
        site("site-prince-george", "Prince George", "British Columbia", 50.0, SiteStatus::Operating),
        site("site-mackenzie", "Mackenzie", "British Columbia", 80.0, SiteStatus::Operating),
        site("site-childress", "Childress", "Texas", 750.0, SiteStatus::UnderConstruction),
        site(
            "site-sweetwater-1",
            "Sweetwater 1",
            "West Texas (Nolan County)",
            1400.0,
            SiteStatus::Secured,
        ),
        site("site-sweetwater-2", "Sweetwater 2", "West Texas", 600.0, SiteStatus::Secured),
    ]
}
