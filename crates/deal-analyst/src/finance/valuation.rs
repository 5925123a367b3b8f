use crate::validation::{require_non_negative, round_cents, InvalidInput};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_CAP_RATE: f64 = 5.0;
pub const DEFAULT_EXPENSE_RATIO: f64 = 0.35;
pub const MAX_TARGET_CAP_RATE: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentValuationResult {
    pub rent_month: f64,
    pub noi: f64,
    pub implied_value: f64,
    pub target_cap_rate: f64,
    pub expense_ratio: f64,
}

/// Values a rental by capitalizing its net operating income.
///
/// `target_cap_rate` is a percentage in `(0, 25]`; `expense_ratio` is the
/// share of gross rent lost to operating costs, in `[0, 1)`.
pub fn rent_vs_price(
    rent_month: f64,
    target_cap_rate: f64,
    expense_ratio: f64,
) -> Result<RentValuationResult, InvalidInput> {
    require_non_negative(rent_month, "rent_month")?;
    if !(target_cap_rate > 0.0 && target_cap_rate <= MAX_TARGET_CAP_RATE) {
        return Err(InvalidInput::CapRateOutOfRange(target_cap_rate));
    }
    if !(0.0..1.0).contains(&expense_ratio) {
        return Err(InvalidInput::ExpenseRatioOutOfRange(expense_ratio));
    }

    let noi = rent_month * (1.0 - expense_ratio) * 12.0;
    let implied_value = noi / (target_cap_rate / 100.0);

    Ok(RentValuationResult {
        rent_month: round_cents(rent_month),
        noi: round_cents(noi),
        implied_value: round_cents(implied_value),
        target_cap_rate,
        expense_ratio,
    })
}
