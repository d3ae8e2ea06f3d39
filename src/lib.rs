//! GPU 배치(구매/리스 단위)의 월별 누적 손익 예측 엔진.
//! 핵심 계산은 라이브러리로 두고 CLI는 그 위의 얇은 껍데기로 둔다.

pub mod app;
pub mod config;
pub mod deployment;
pub mod finance;
pub mod format;
pub mod i18n;
pub mod model;
pub mod projection;
pub mod storage;
pub mod ui_cli;
pub mod units;
