//! Equated monthly installment maths. Every EMI in the workspace is computed
//! by [`emi::calculate_emi`]; sweeps, schedules, quotes and approval terms
//! call into it rather than restating the formula.

pub mod emi;
pub mod schedule;
pub mod sweep;

pub use emi::{calculate_amortization, calculate_emi, AmortizationOutput, LoanTerms};
pub use sweep::{APPROVAL_TENURES, CALCULATOR_TENURES, QUICK_TENURES};
