use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const INIT_CONFIG_WRITTEN: &str = "init.config_written";
    pub const INIT_PORTFOLIO_WRITTEN: &str = "init.portfolio_written";
    pub const INIT_ALREADY_EXISTS: &str = "init.already_exists";

    pub const PROJECT_HEADING: &str = "project.heading";
    pub const TOTALS_HEADING: &str = "project.totals_heading";
    pub const GRAND_TOTAL: &str = "project.grand_total";
    pub const COL_MONTH: &str = "column.month";
    pub const COL_DEPLOYED: &str = "column.deployed";
    pub const COL_VALUE: &str = "column.value";

    pub const BREAKDOWN_HEADING: &str = "breakdown.heading";
    pub const BREAKDOWN_NEW_UNITS: &str = "breakdown.new_units";
    pub const BREAKDOWN_LIVE_UNITS: &str = "breakdown.live_units";
    pub const BREAKDOWN_REVENUE: &str = "breakdown.revenue";
    pub const BREAKDOWN_INSTALLATION: &str = "breakdown.installation";
    pub const BREAKDOWN_CAPITAL: &str = "breakdown.capital";
    pub const BREAKDOWN_OVERHEAD: &str = "breakdown.overhead";
    pub const BREAKDOWN_ELECTRICAL: &str = "breakdown.electrical";
    pub const BREAKDOWN_ENERGY: &str = "breakdown.energy";
    pub const BREAKDOWN_NET: &str = "breakdown.net";
    pub const BREAKDOWN_CUMULATIVE: &str = "breakdown.cumulative";

    pub const ARR_HEADING: &str = "arr.heading";
    pub const ARR_MONTH_HEADING: &str = "arr.month_heading";
    pub const ARR_TOTAL_GPUS: &str = "arr.total_gpus";
    pub const ARR_TOTAL: &str = "arr.total";
    pub const ARR_NO_LIVE: &str = "arr.no_live";

    pub const EDIT_APPLIED: &str = "edit.applied";
    pub const EDIT_DELIVERY: &str = "edit.delivery";
    pub const EDIT_NOT_DELIVERED: &str = "edit.not_delivered";

    pub const SITES_HEADING: &str = "sites.heading";

    pub const LOAN_PAYMENT: &str = "loan.payment";
    pub const LOAN_TOTAL_PAID: &str = "loan.total_paid";
    pub const LOAN_TOTAL_INTEREST: &str = "loan.total_interest";
    pub const LOAN_BATCH_INTEREST: &str = "loan.batch_interest";

    pub const BATCH_ADDED: &str = "batch.added";
    pub const BATCH_UPDATED: &str = "batch.updated";
    pub const BATCH_REMOVED: &str = "batch.removed";
    pub const BATCH_FINAL_VALUE: &str = "batch.final_value";
    pub const SITE_UPDATED: &str = "site.updated";
    pub const RESET_DONE: &str = "reset.done";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// CLI 출력 문자열 번들.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 키가 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &'static str) -> &'static str {
        let found = match self.lang {
            Language::Ko => ko(key),
            Language::En => en(key),
        };
        found.unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        INIT_CONFIG_WRITTEN => "설정 파일을 만들었습니다",
        INIT_PORTFOLIO_WRITTEN => "기본 포트폴리오를 만들었습니다",
        INIT_ALREADY_EXISTS => "이미 있어 건너뜁니다",
        PROJECT_HEADING => "-- 배치별 누적 손익 --",
        TOTALS_HEADING => "-- 포트폴리오 합계 --",
        GRAND_TOTAL => "최종 누적 손익",
        COL_MONTH => "월",
        COL_DEPLOYED => "배치율",
        COL_VALUE => "누적 손익",
        BREAKDOWN_HEADING => "-- 월별 상세 --",
        BREAKDOWN_NEW_UNITS => "신규 가동 GPU",
        BREAKDOWN_LIVE_UNITS => "가동 GPU",
        BREAKDOWN_REVENUE => "매출",
        BREAKDOWN_INSTALLATION => "설치비",
        BREAKDOWN_CAPITAL => "GPU 구매/리스",
        BREAKDOWN_OVERHEAD => "데이터센터 운영비",
        BREAKDOWN_ELECTRICAL => "전기료",
        BREAKDOWN_ENERGY => "전력 사용량",
        BREAKDOWN_NET => "월 순손익",
        BREAKDOWN_CUMULATIVE => "누적 손익",
        ARR_HEADING => "-- 월별 ARR --",
        ARR_MONTH_HEADING => "-- ARR 구성 --",
        ARR_TOTAL_GPUS => "가동 GPU 합계",
        ARR_TOTAL => "ARR 합계",
        ARR_NO_LIVE => "가동 중인 배치가 없습니다",
        EDIT_APPLIED => "배치 일정을 수정했습니다",
        EDIT_DELIVERY => "배송일",
        EDIT_NOT_DELIVERED => "배송일 없음(1% 미만)",
        SITES_HEADING => "-- 사이트 용량 사용 --",
        LOAN_PAYMENT => "GPU 1개 월 리스료",
        LOAN_TOTAL_PAID => "GPU 1개 총 상환액",
        LOAN_TOTAL_INTEREST => "GPU 1개 총 이자",
        LOAN_BATCH_INTEREST => "배치 전체 이자",
        BATCH_ADDED => "배치를 추가했습니다",
        BATCH_UPDATED => "배치를 수정했습니다",
        BATCH_REMOVED => "배치를 삭제했습니다",
        BATCH_FINAL_VALUE => "타임라인 끝 누적 손익",
        SITE_UPDATED => "사이트를 수정했습니다",
        RESET_DONE => "배치와 수익성 설정을 기본값으로 되돌렸습니다",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        INIT_CONFIG_WRITTEN => "Config file written",
        INIT_PORTFOLIO_WRITTEN => "Default portfolio written",
        INIT_ALREADY_EXISTS => "already exists, skipped",
        PROJECT_HEADING => "-- Cumulative profit by batch --",
        TOTALS_HEADING => "-- Portfolio totals --",
        GRAND_TOTAL => "Grand total",
        COL_MONTH => "Month",
        COL_DEPLOYED => "Deployed",
        COL_VALUE => "Cumulative",
        BREAKDOWN_HEADING => "-- Month detail --",
        BREAKDOWN_NEW_UNITS => "New GPUs live",
        BREAKDOWN_LIVE_UNITS => "GPUs live",
        BREAKDOWN_REVENUE => "Revenue",
        BREAKDOWN_INSTALLATION => "Installation",
        BREAKDOWN_CAPITAL => "GPU cost (cash/lease)",
        BREAKDOWN_OVERHEAD => "Datacenter overhead",
        BREAKDOWN_ELECTRICAL => "Electricity",
        BREAKDOWN_ENERGY => "Energy",
        BREAKDOWN_NET => "Monthly net",
        BREAKDOWN_CUMULATIVE => "Cumulative",
        ARR_HEADING => "-- ARR by month --",
        ARR_MONTH_HEADING => "-- ARR breakdown --",
        ARR_TOTAL_GPUS => "Total live GPUs",
        ARR_TOTAL => "Total ARR",
        ARR_NO_LIVE => "No live batches",
        EDIT_APPLIED => "Deployment schedule updated",
        EDIT_DELIVERY => "Delivery date",
        EDIT_NOT_DELIVERED => "Not delivered (<1%)",
        SITES_HEADING => "-- Site capacity usage --",
        LOAN_PAYMENT => "Lease payment per GPU",
        LOAN_TOTAL_PAID => "Total paid per GPU",
        LOAN_TOTAL_INTEREST => "Total interest per GPU",
        LOAN_BATCH_INTEREST => "Batch interest",
        BATCH_ADDED => "Batch added",
        BATCH_UPDATED => "Batch updated",
        BATCH_REMOVED => "Batch removed",
        BATCH_FINAL_VALUE => "Cumulative at end of timeline",
        SITE_UPDATED => "Site updated",
        RESET_DONE => "Batches and profitability settings reset to defaults",
        _ => return None,
    })
}
