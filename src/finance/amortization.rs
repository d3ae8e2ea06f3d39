use thiserror::Error;

/// 상환 계산 오류.
#[derive(Debug, Error, PartialEq)]
pub enum AmortizationError {
    #[error("상환 기간은 1개월 이상이어야 합니다")]
    ZeroTerm,
    #[error("잘못된 상환 입력: {0}")]
    InvalidInput(&'static str),
}

/// 원리금 균등 상환 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    /// 원금 [$]
    pub principal: f64,
    /// 연이율 [%]
    pub annual_rate_percent: f64,
    /// 상환 기간 [개월]
    pub term_months: u32,
}

/// 상환 요약.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanSummary {
    /// 월 상환액 [$]
    pub monthly_payment: f64,
    /// 총 상환액 [$]
    pub total_paid: f64,
    /// 총 이자 [$]
    pub total_interest: f64,
}

/// 월 상환액을 계산한다. P·r(1+r)^n / ((1+r)^n − 1), r = 연이율/12.
///
/// 이율이 0이면 원금/기간. 배치 시점과 무관하므로 호출 측에서 코호트별 GPU 수를 곱한다.
pub fn monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<f64, AmortizationError> {
    if term_months == 0 {
        return Err(AmortizationError::ZeroTerm);
    }
    if !principal.is_finite() {
        return Err(AmortizationError::InvalidInput("principal"));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(AmortizationError::InvalidInput("annual_rate_percent"));
    }
    let n = term_months as f64;
    if annual_rate_percent == 0.0 {
        return Ok(principal / n);
    }
    let r = annual_rate_percent / 100.0 / 12.0;
    let growth = (1.0 + r).powi(term_months as i32);
    Ok(principal * r * growth / (growth - 1.0))
}

/// 월 상환액과 총 이자를 함께 계산한다.
pub fn loan_summary(input: LoanInput) -> Result<LoanSummary, AmortizationError> {
    let payment = monthly_payment(input.principal, input.annual_rate_percent, input.term_months)?;
    let total_paid = payment * input.term_months as f64;
    Ok(LoanSummary {
        monthly_payment: payment,
        total_paid,
        total_interest: total_paid - input.principal,
    })
}
