use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::deployment::{apply_batch_edit, ScheduleError};
use crate::i18n::{keys, Translator};
use crate::model::{Batch, ChipType, FundingType, MonthData, ProfitabilitySettings, SiteStatus};
use crate::projection::{self, ProjectionError};
use crate::storage::{self, BatchEdit, NewBatch, Portfolio, SiteEdit, StorageError};
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("포트폴리오 저장소 오류: {0}")]
    Storage(#[from] StorageError),
    #[error("예측 계산 오류: {0}")]
    Projection(#[from] ProjectionError),
    #[error("배치 일정 오류: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("배치를 찾을 수 없습니다: {0}")]
    BatchNotFound(String),
}

/// CLI 하위 명령.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 기본 설정과 예시 포트폴리오를 만든다
    Init,
    /// 배치별 월간 누적 손익과 포트폴리오 합계
    Project {
        /// 이 배치만 표시
        #[arg(long)]
        batch: Option<String>,
    },
    /// 한 배치의 특정 월 비용/매출 상세
    Breakdown {
        #[arg(long)]
        batch: String,
        /// 타임라인 인덱스(0부터)
        #[arg(long)]
        month: u32,
    },
    /// 월별 ARR, 또는 한 달의 배치별 ARR 구성
    Arr {
        #[arg(long)]
        month: Option<usize>,
    },
    /// 배치 일정의 한 달 델타를 수정한다
    Edit {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        month: u32,
        /// 그 달에 새로 배치할 비율 [%] (음수면 회수)
        #[arg(long, allow_hyphen_values = true)]
        percent: f64,
    },
    /// 사이트별 MW 사용량
    Sites {
        #[arg(long, default_value_t = 0)]
        month: usize,
    },
    /// 새 배치를 추가한다 (설치 월부터 4개월 균등 램프)
    AddBatch {
        /// B200, GB300, "GB300 NVL72" 등
        #[arg(long)]
        chip: ChipType,
        #[arg(long)]
        quantity: u32,
        /// 설치 시작 월 (YYYY-MM)
        #[arg(long, value_parser = parse_year_month)]
        start: (i32, u32),
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        site: Option<String>,
        /// cash | lease
        #[arg(long, default_value = "lease")]
        funding: FundingType,
        #[arg(long, default_value_t = 36)]
        lease_term: u32,
        /// 연이율 [%]. 생략하면 설정의 interest_rate
        #[arg(long)]
        apr: Option<f64>,
    },
    /// 배치 필드를 수정한다
    UpdateBatch {
        #[arg(long)]
        batch: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        chip: Option<ChipType>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        funding: Option<FundingType>,
        #[arg(long)]
        lease_term: Option<u32>,
        #[arg(long)]
        apr: Option<f64>,
    },
    /// 배치를 삭제한다
    RemoveBatch {
        #[arg(long)]
        batch: String,
    },
    /// 사이트 정보를 수정한다
    Site {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// 용량 [MW]
        #[arg(long)]
        capacity: Option<f64>,
        /// operating | under-construction | secured
        #[arg(long)]
        status: Option<SiteStatus>,
    },
    /// 배치와 수익성 설정을 기본값으로 되돌린다 (사이트는 유지)
    Reset,
}

/// `YYYY-MM` 문자열을 (연도, 0부터 시작하는 월)로 바꾼다.
pub fn parse_year_month(s: &str) -> Result<(i32, u32), String> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|e| format!("Invalid month '{s}' (expected YYYY-MM): {e}"))?;
    Ok((date.year(), date.month0()))
}

/// 명령 실행에 필요한 상태.
pub struct Context {
    pub config_path: PathBuf,
    pub config: Config,
    pub config_created: bool,
    pub tr: Translator,
}

impl Context {
    fn portfolio_path(&self) -> PathBuf {
        self.config.portfolio_path_relative_to(&self.config_path)
    }

    fn load_portfolio(&self) -> Result<Portfolio, AppError> {
        Ok(storage::load_or_default(
            &self.portfolio_path(),
            &self.config.timeline,
            self.config.settings.interest_rate,
        )?)
    }

    fn save_portfolio(&self, portfolio: &Portfolio) -> Result<(), AppError> {
        Ok(storage::save_portfolio(&self.portfolio_path(), portfolio)?)
    }

    /// 바뀐 배치를 한 번 예측해 본다. 칩 프로필이 없으면 저장 전에 실패한다.
    fn final_value(&self, batch: &Batch) -> Result<Option<f64>, AppError> {
        let data = projection::project(batch, &self.config.timeline, &self.config.settings)?;
        Ok(data.last().map(|m| m.value))
    }

    fn check_month(&self, month: usize) -> Result<(), AppError> {
        let total_months = self.config.timeline.total_months as usize;
        if month >= total_months {
            return Err(ProjectionError::MonthOutOfRange {
                month,
                total_months,
            }
            .into());
        }
        Ok(())
    }

    fn project_all(&self, portfolio: &Portfolio) -> Result<Vec<Vec<MonthData>>, AppError> {
        portfolio
            .batches
            .iter()
            .map(|batch| {
                projection::project(batch, &self.config.timeline, &self.config.settings)
                    .map_err(AppError::from)
            })
            .collect()
    }
}

/// 명령 하나를 실행한다.
pub fn run(ctx: &Context, command: Command) -> Result<(), AppError> {
    let tr = &ctx.tr;
    match command {
        Command::Init => {
            let config_note = if ctx.config_created {
                tr.t(keys::INIT_CONFIG_WRITTEN).to_string()
            } else {
                tr.t(keys::INIT_ALREADY_EXISTS).to_string()
            };
            println!("{}: {config_note}", ctx.config_path.display());
            let path = ctx.portfolio_path();
            if path.exists() {
                println!("{}: {}", path.display(), tr.t(keys::INIT_ALREADY_EXISTS));
            } else {
                let portfolio = Portfolio::with_defaults(
                    &ctx.config.timeline,
                    ctx.config.settings.interest_rate,
                );
                storage::save_portfolio(&path, &portfolio)?;
                println!("{}: {}", path.display(), tr.t(keys::INIT_PORTFOLIO_WRITTEN));
            }
        }
        Command::Project { batch } => {
            let portfolio = ctx.load_portfolio()?;
            let all = ctx.project_all(&portfolio)?;
            if let Some(id) = batch.as_deref() {
                let index = portfolio
                    .batches
                    .iter()
                    .position(|b| b.id == id)
                    .ok_or_else(|| AppError::BatchNotFound(id.to_string()))?;
                ui_cli::print_batch_projection(
                    tr,
                    &ctx.config.timeline,
                    &portfolio.batches[index],
                    &all[index],
                );
            } else {
                for (batch, data) in portfolio.batches.iter().zip(&all) {
                    ui_cli::print_batch_projection(tr, &ctx.config.timeline, batch, data);
                }
                let totals = projection::totals(&all)?;
                ui_cli::print_totals(tr, &ctx.config.timeline, &totals);
            }
        }
        Command::Breakdown { batch, month } => {
            let portfolio = ctx.load_portfolio()?;
            let target = portfolio
                .batch(&batch)
                .ok_or_else(|| AppError::BatchNotFound(batch.clone()))?;
            let detail =
                projection::project_breakdown(target, &ctx.config.timeline, &ctx.config.settings)?;
            let row = detail.get(month as usize).ok_or(ProjectionError::MonthOutOfRange {
                month: month as usize,
                total_months: detail.len(),
            })?;
            let loan = projection::lease_terms(target, &ctx.config.settings)?;
            ui_cli::print_breakdown(
                tr,
                &ctx.config.timeline,
                target,
                row,
                loan.as_ref().map(|(_, summary)| summary),
            );
        }
        Command::Arr { month } => {
            let portfolio = ctx.load_portfolio()?;
            let all = ctx.project_all(&portfolio)?;
            match month {
                Some(m) => {
                    let breakdown = projection::arr_breakdown(
                        &portfolio.batches,
                        &all,
                        &ctx.config.settings,
                        m,
                    )?;
                    ui_cli::print_arr_breakdown(tr, &ctx.config.timeline, &breakdown);
                }
                None => {
                    let series = projection::arr(&portfolio.batches, &all, &ctx.config.settings)?;
                    ui_cli::print_arr(tr, &ctx.config.timeline, &series);
                }
            }
        }
        Command::Edit {
            batch,
            month,
            percent,
        } => {
            let mut portfolio = ctx.load_portfolio()?;
            let target = portfolio
                .batch(&batch)
                .ok_or_else(|| AppError::BatchNotFound(batch.clone()))?;
            let updated = apply_batch_edit(target, &ctx.config.timeline, month, percent)?;
            ui_cli::print_edit_result(tr, &ctx.config.timeline, &updated, month);
            portfolio.replace_batch(updated);
            ctx.save_portfolio(&portfolio)?;
        }
        Command::Sites { month } => {
            ctx.check_month(month)?;
            let portfolio = ctx.load_portfolio()?;
            let all = ctx.project_all(&portfolio)?;
            let report = projection::site_utilization(
                &portfolio.sites,
                &portfolio.batches,
                &all,
                &ctx.config.settings,
                month,
            )?;
            ui_cli::print_sites(tr, &ctx.config.timeline, month, &report);
        }
        Command::AddBatch {
            chip,
            quantity,
            start: (installation_year, installation_month),
            name,
            site,
            funding,
            lease_term,
            apr,
        } => {
            let mut portfolio = ctx.load_portfolio()?;
            let input = NewBatch {
                name,
                chip_type: chip,
                quantity,
                installation_year,
                installation_month,
                site_id: site,
                funding_type: funding,
                lease_term,
                apr: apr.unwrap_or(ctx.config.settings.interest_rate),
            };
            let added = portfolio.add_batch(input, &ctx.config.timeline)?.clone();
            let final_value = ctx.final_value(&added)?;
            ctx.save_portfolio(&portfolio)?;
            ui_cli::print_batch_summary(tr, keys::BATCH_ADDED, &added, final_value);
        }
        Command::UpdateBatch {
            batch,
            name,
            chip,
            quantity,
            site,
            funding,
            lease_term,
            apr,
        } => {
            let mut portfolio = ctx.load_portfolio()?;
            let edit = BatchEdit {
                name,
                chip_type: chip,
                quantity,
                site_id: site,
                funding_type: funding,
                lease_term,
                apr,
            };
            let updated = portfolio.update_batch(&batch, &edit)?.clone();
            let final_value = ctx.final_value(&updated)?;
            ctx.save_portfolio(&portfolio)?;
            ui_cli::print_batch_summary(tr, keys::BATCH_UPDATED, &updated, final_value);
        }
        Command::RemoveBatch { batch } => {
            let mut portfolio = ctx.load_portfolio()?;
            let removed = portfolio.remove_batch(&batch)?;
            ctx.save_portfolio(&portfolio)?;
            ui_cli::print_batch_summary(tr, keys::BATCH_REMOVED, &removed, None);
        }
        Command::Site {
            id,
            name,
            location,
            capacity,
            status,
        } => {
            let mut portfolio = ctx.load_portfolio()?;
            let edit = SiteEdit {
                name,
                location,
                capacity_mw: capacity,
                status,
            };
            let site = portfolio.edit_site(&id, &edit)?.clone();
            ctx.save_portfolio(&portfolio)?;
            ui_cli::print_site(tr, &site);
        }
        Command::Reset => {
            let mut config = ctx.config.clone();
            config.settings = ProfitabilitySettings::default();
            config.save(&ctx.config_path)?;

            let mut portfolio = ctx.load_portfolio()?;
            portfolio.reset_batches(&config.timeline, config.settings.interest_rate);
            ctx.save_portfolio(&portfolio)?;
            println!("{}", tr.t(keys::RESET_DONE));
        }
    }
    Ok(())
}
