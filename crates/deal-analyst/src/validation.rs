/// Caller-supplied values that violate a documented precondition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("keyword must be at least {min} characters of address text")]
    KeywordTooShort { min: usize },
    #[error("{field} must be >= 0 (found {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("years must be >= 1 (found {0})")]
    TermTooShort(i32),
    #[error("down_payment ({down_payment}) cannot exceed price ({price})")]
    DownPaymentExceedsPrice { down_payment: f64, price: f64 },
    #[error("target_cap_rate must be greater than 0 and at most 25 (found {0})")]
    CapRateOutOfRange(f64),
    #[error("expense_ratio must be between 0 and 1, exclusive of 1 (found {0})")]
    ExpenseRatioOutOfRange(f64),
}

pub(crate) fn require_non_negative(value: f64, field: &'static str) -> Result<(), InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InvalidInput::Negative { field, value });
    }
    Ok(())
}

/// Rounds half away from zero to two decimal places.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
