//! Deterministic purchase and valuation calculators.

pub mod mortgage;
pub mod valuation;

pub use mortgage::{
    amortized_payment, mortgage_summary, MortgageInputs, MortgageResult, MortgageTerms,
};
pub use valuation::{
    rent_vs_price, RentValuationResult, DEFAULT_EXPENSE_RATIO, DEFAULT_TARGET_CAP_RATE,
    MAX_TARGET_CAP_RATE,
};
