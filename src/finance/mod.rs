//! 칩별 단가 조회와 대출 상환 계산.

pub mod amortization;
pub mod chip_economics;

pub use amortization::{loan_summary, monthly_payment, AmortizationError, LoanInput, LoanSummary};
pub use chip_economics::ChipEconomics;
