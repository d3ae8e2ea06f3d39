use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 엔진 출력. 배치 하나의 한 달치 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthData {
    /// 달력 월(0=Jan)
    pub month: u32,
    pub year: i32,
    /// 누적 배치율 [%] (0~100)
    pub percent_deployed: f64,
    /// 해당 월까지의 누적 손익 [$]
    pub value: f64,
}

/// 모든 배치가 공유하는 타임라인. 인덱스 0이 `start_year`년 `start_month`월이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// 시작 월(0=Jan ~ 11=Dec)
    pub start_month: u32,
    pub start_year: i32,
    pub total_months: u32,
}

impl Default for Timeline {
    /// 2025년 9월부터 48개월(2029년 8월까지).
    fn default() -> Self {
        Self {
            start_month: 8,
            start_year: 2025,
            total_months: 48,
        }
    }
}

impl Timeline {
    /// 타임라인 인덱스를 (달력 월, 연도)로 바꾼다.
    pub fn calendar(&self, index: u32) -> (u32, i32) {
        let absolute = self.start_month + index;
        (absolute % 12, self.start_year + (absolute / 12) as i32)
    }

    /// 달력 (연도, 월)을 타임라인 인덱스로 바꾼다. 시작 이전이면 음수.
    pub fn index_of(&self, year: i32, month: u32) -> i64 {
        (year as i64 - self.start_year as i64) * 12 + (month as i64 - self.start_month as i64)
    }

    /// "Sep 2025" 형태의 라벨.
    pub fn label(&self, index: u32) -> String {
        let (month, year) = self.calendar(index);
        format!("{} {}", MONTH_NAMES[month as usize], year)
    }

    /// 해당 월의 1일.
    pub fn first_day(&self, index: u32) -> Option<NaiveDate> {
        let (month, year) = self.calendar(index);
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
}

/// 달력 월 이름(0=Jan).
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month % 12) as usize]
}
