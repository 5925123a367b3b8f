use crate::validation::{require_non_negative, round_cents, InvalidInput};
use serde::{Deserialize, Serialize};

/// Purchase and carrying-cost parameters for a financed acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    pub price: f64,
    pub down_payment: f64,
    pub rate_percent: f64,
    pub years: i32,
    #[serde(default)]
    pub taxes_month: f64,
    #[serde(default)]
    pub insurance_month: f64,
    #[serde(default)]
    pub hoa_month: f64,
    #[serde(default)]
    pub rent_month: f64,
}

impl MortgageTerms {
    pub fn new(price: f64, down_payment: f64, rate_percent: f64, years: i32) -> Self {
        Self {
            price,
            down_payment,
            rate_percent,
            years,
            taxes_month: 0.0,
            insurance_month: 0.0,
            hoa_month: 0.0,
            rent_month: 0.0,
        }
    }

    pub fn with_escrow(mut self, taxes_month: f64, insurance_month: f64, hoa_month: f64) -> Self {
        self.taxes_month = taxes_month;
        self.insurance_month = insurance_month;
        self.hoa_month = hoa_month;
        self
    }

    pub fn with_rent(mut self, rent_month: f64) -> Self {
        self.rent_month = rent_month;
        self
    }

    fn validate(&self) -> Result<(), InvalidInput> {
        require_non_negative(self.price, "price")?;
        require_non_negative(self.down_payment, "down_payment")?;
        require_non_negative(self.rate_percent, "rate_percent")?;
        require_non_negative(f64::from(self.years), "years")?;
        require_non_negative(self.taxes_month, "taxes_month")?;
        require_non_negative(self.insurance_month, "insurance_month")?;
        require_non_negative(self.hoa_month, "hoa_month")?;
        require_non_negative(self.rent_month, "rent_month")?;

        if self.years < 1 {
            return Err(InvalidInput::TermTooShort(self.years));
        }
        if self.down_payment > self.price {
            return Err(InvalidInput::DownPaymentExceedsPrice {
                down_payment: self.down_payment,
                price: self.price,
            });
        }
        Ok(())
    }
}

/// Raw inputs echoed back alongside the rounded figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInputs {
    pub rate_percent: f64,
    pub years: i32,
    pub taxes_month: f64,
    pub insurance_month: f64,
    pub hoa_month: f64,
    pub rent_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub price: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub ltv_percent: f64,
    pub principal_interest: f64,
    pub monthly_payment: f64,
    pub cashflow: f64,
    pub inputs: MortgageInputs,
}

/// Level monthly principal-and-interest payment for a fully amortizing loan.
pub fn amortized_payment(loan_amount: f64, monthly_rate: f64, periods: f64) -> f64 {
    if periods <= 0.0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return loan_amount / periods;
    }

    // Discount form: (1 + r)^-n underflows to 0 for long terms or steep rates,
    // leaving the interest-only payment instead of inf / inf.
    let discount = (1.0 + monthly_rate).powf(-periods);
    loan_amount * monthly_rate / (1.0 - discount)
}

/// Monthly PITI plus HOA, loan-to-value and cashflow against rent.
pub fn mortgage_summary(terms: &MortgageTerms) -> Result<MortgageResult, InvalidInput> {
    terms.validate()?;

    let loan_amount = (terms.price - terms.down_payment).max(0.0);
    let monthly_rate = terms.rate_percent / 100.0 / 12.0;
    let periods = f64::from(terms.years) * 12.0;

    let principal_interest = amortized_payment(loan_amount, monthly_rate, periods);
    let monthly_payment =
        principal_interest + terms.taxes_month + terms.insurance_month + terms.hoa_month;
    // Zero rent yields -monthly_payment, same as omitting rent.
    let cashflow = terms.rent_month - monthly_payment;
    if !monthly_payment.is_finite() {
        return Err(InvalidInput::NotFinite {
            field: "monthly_payment",
        });
    }
    let ltv_percent = if terms.price > 0.0 {
        loan_amount / terms.price * 100.0
    } else {
        0.0
    };

    Ok(MortgageResult {
        price: round_cents(terms.price),
        down_payment: round_cents(terms.down_payment),
        loan_amount: round_cents(loan_amount),
        ltv_percent: round_cents(ltv_percent),
        principal_interest: round_cents(principal_interest),
        monthly_payment: round_cents(monthly_payment),
        cashflow: round_cents(cashflow),
        inputs: MortgageInputs {
            rate_percent: terms.rate_percent,
            years: terms.years,
            taxes_month: terms.taxes_month,
            insurance_month: terms.insurance_month,
            hoa_month: terms.hoa_month,
            rent_month: terms.rent_month,
        },
    })
}
