//! 계산 결과를 터미널 표로 출력한다.

use crate::finance::LoanSummary;
use crate::format::{format_money, format_percent};
use crate::i18n::{keys, Translator};
use crate::model::month::month_name;
use crate::model::{Batch, MonthData, Site, Timeline};
use crate::projection::{ArrBreakdown, ArrPoint, MonthBreakdown, SiteUtilization};

/// 배치 하나의 월별 배치율/누적 손익 표.
pub fn print_batch_projection(
    tr: &Translator,
    timeline: &Timeline,
    batch: &Batch,
    data: &[MonthData],
) {
    println!("\n{}", tr.t(keys::PROJECT_HEADING));
    println!(
        "[{}] {} x {} ({} {})",
        batch.id,
        batch.quantity,
        batch.chip_type,
        month_name(batch.installation_month),
        batch.installation_year
    );
    println!(
        "{:<10} {:>9} {:>12}",
        tr.t(keys::COL_MONTH),
        tr.t(keys::COL_DEPLOYED),
        tr.t(keys::COL_VALUE)
    );
    for (i, month) in data.iter().enumerate() {
        println!(
            "{:<10} {:>9} {:>12}",
            timeline.label(i as u32),
            format_percent(month.percent_deployed),
            format_money(month.value)
        );
    }
}

/// 포트폴리오 합계와 최종 누적 손익.
pub fn print_totals(tr: &Translator, timeline: &Timeline, totals: &[MonthData]) {
    println!("\n{}", tr.t(keys::TOTALS_HEADING));
    for (i, month) in totals.iter().enumerate() {
        println!("{:<10} {:>12}", timeline.label(i as u32), format_money(month.value));
    }
    println!(
        "{}: {}",
        tr.t(keys::GRAND_TOTAL),
        format_money(crate::projection::grand_total(totals))
    );
}

/// 한 달의 비용/매출 상세.
pub fn print_breakdown(
    tr: &Translator,
    timeline: &Timeline,
    batch: &Batch,
    row: &MonthBreakdown,
    loan: Option<&LoanSummary>,
) {
    println!("\n{}", tr.t(keys::BREAKDOWN_HEADING));
    println!(
        "[{}] {} {} - {}",
        batch.id,
        batch.chip_type,
        timeline.label(row.index),
        format_percent(row.percent_deployed)
    );
    let lines: [(&'static str, String); 10] = [
        (keys::BREAKDOWN_NEW_UNITS, format!("{:.0}", row.new_units)),
        (keys::BREAKDOWN_LIVE_UNITS, format!("{:.0}", row.live_units)),
        (keys::BREAKDOWN_REVENUE, format_money(row.revenue)),
        (keys::BREAKDOWN_INSTALLATION, format_money(-row.installation_cost)),
        (keys::BREAKDOWN_CAPITAL, format_money(-row.capital_cost)),
        (keys::BREAKDOWN_OVERHEAD, format_money(-row.datacenter_overhead)),
        (keys::BREAKDOWN_ELECTRICAL, format_money(-row.electrical_cost)),
        (keys::BREAKDOWN_ENERGY, format!("{:.1} MWh", row.energy_mwh)),
        (keys::BREAKDOWN_NET, format_money(row.net)),
        (keys::BREAKDOWN_CUMULATIVE, format_money(row.cumulative)),
    ];
    for (key, value) in lines {
        println!("  {:<24} {:>14}", tr.t(key), value);
    }
    if let Some(loan) = loan {
        let batch_interest = loan.total_interest * batch.quantity as f64;
        let loan_lines = [
            (keys::LOAN_PAYMENT, format_money(loan.monthly_payment)),
            (keys::LOAN_TOTAL_PAID, format_money(loan.total_paid)),
            (keys::LOAN_TOTAL_INTEREST, format_money(loan.total_interest)),
            (keys::LOAN_BATCH_INTEREST, format_money(batch_interest)),
        ];
        for (key, value) in loan_lines {
            println!("  {:<24} {:>14}", tr.t(key), value);
        }
    }
}

/// 배치 추가/수정 결과 한 줄 요약.
pub fn print_batch_summary(
    tr: &Translator,
    heading_key: &'static str,
    batch: &Batch,
    final_value: Option<f64>,
) {
    println!(
        "{}: [{}] {} ({} x {}, {} {}, {:?})",
        tr.t(heading_key),
        batch.id,
        batch.name,
        batch.quantity,
        batch.chip_type,
        month_name(batch.installation_month),
        batch.installation_year,
        batch.funding_type
    );
    if let Some(value) = final_value {
        println!("  {}: {}", tr.t(keys::BATCH_FINAL_VALUE), format_money(value));
    }
}

/// 사이트 수정 결과.
pub fn print_site(tr: &Translator, site: &Site) {
    println!(
        "{}: [{}] {} / {} / {:.1} MW / {:?}",
        tr.t(keys::SITE_UPDATED),
        site.id,
        site.name,
        site.location,
        site.capacity_mw,
        site.status
    );
}

/// 월별 ARR 시계열.
pub fn print_arr(tr: &Translator, timeline: &Timeline, series: &[ArrPoint]) {
    println!("\n{}", tr.t(keys::ARR_HEADING));
    for (i, point) in series.iter().enumerate() {
        println!("{:<10} {:>12}", timeline.label(i as u32), format_money(point.value));
    }
}

/// 한 달의 배치별 ARR 구성.
pub fn print_arr_breakdown(tr: &Translator, timeline: &Timeline, breakdown: &ArrBreakdown) {
    println!(
        "\n{} {}",
        tr.t(keys::ARR_MONTH_HEADING),
        timeline.label(breakdown.month_index as u32)
    );
    if breakdown.rows.is_empty() {
        println!("{}", tr.t(keys::ARR_NO_LIVE));
        return;
    }
    for row in &breakdown.rows {
        println!(
            "{:<12} {:<12} {:>8} {:>8.0} GPU {:>10} {:>10}",
            row.batch_id,
            row.chip_type.label(),
            format!("{} {}", month_name(row.installation_month), row.installation_year),
            row.live_gpus,
            format_money(row.monthly_revenue),
            format_money(row.annual_revenue)
        );
    }
    println!("{}: {:.0}", tr.t(keys::ARR_TOTAL_GPUS), breakdown.total_live_gpus);
    println!("{}: {}", tr.t(keys::ARR_TOTAL), format_money(breakdown.total_arr));
}

/// 일정 수정 결과.
pub fn print_edit_result(tr: &Translator, timeline: &Timeline, batch: &Batch, month: u32) {
    let applied = batch.deployment_schedule.get(&month).copied().unwrap_or(0.0);
    println!(
        "{}: [{}] {} {}",
        tr.t(keys::EDIT_APPLIED),
        batch.id,
        timeline.label(month),
        format_percent(applied)
    );
    match &batch.delivery_date {
        Some(date) => println!("{}: {date}", tr.t(keys::EDIT_DELIVERY)),
        None => println!("{}", tr.t(keys::EDIT_NOT_DELIVERED)),
    }
}

/// 사이트별 MW 사용량.
pub fn print_sites(
    tr: &Translator,
    timeline: &Timeline,
    month: usize,
    report: &[SiteUtilization],
) {
    println!("\n{} {}", tr.t(keys::SITES_HEADING), timeline.label(month as u32));
    for site in report {
        println!(
            "{:<16} {:>8.2} / {:>8.1} MW ({:>5.1}%)  IT {:>7.2} MW",
            site.site_name,
            site.mw_in_use,
            site.capacity_mw,
            site.utilization_percent,
            site.it_load_mw
        );
    }
}
