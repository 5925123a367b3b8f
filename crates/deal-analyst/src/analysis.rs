//! One-shot deal review combining comps, financing and rent-based value.

use crate::comps::{CompsLookup, CompsResult, DEFAULT_MAX_RESULTS};
use crate::finance::{
    mortgage_summary, rent_vs_price, MortgageResult, MortgageTerms, RentValuationResult,
    DEFAULT_EXPENSE_RATIO, DEFAULT_TARGET_CAP_RATE,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ADDRESS: &str = "1184 Lavaca Dr, Forney, TX 75126";
pub const DEFAULT_DOWN_PAYMENT_SHARE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealAnalysisRequest {
    pub address: String,
    pub price: f64,
    /// Used for financing when every comp lacks a price. Defaults to `price`.
    pub fallback_price: Option<f64>,
    /// Defaults to 20% of `price`.
    pub down_payment: Option<f64>,
    pub rate_percent: f64,
    pub years: i32,
    pub taxes_month: f64,
    pub insurance_month: f64,
    pub hoa_month: f64,
    pub rent_month: f64,
    pub target_cap_rate: f64,
    pub expense_ratio: f64,
    pub preferred_source: String,
    pub max_results: Option<i64>,
}

impl Default for DealAnalysisRequest {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            price: 350_000.0,
            fallback_price: None,
            down_payment: None,
            rate_percent: 6.5,
            years: 30,
            taxes_month: 350.0,
            insurance_month: 120.0,
            hoa_month: 0.0,
            rent_month: 2_400.0,
            target_cap_rate: DEFAULT_TARGET_CAP_RATE,
            expense_ratio: DEFAULT_EXPENSE_RATIO,
            preferred_source: "auto".to_string(),
            max_results: Some(DEFAULT_MAX_RESULTS as i64),
        }
    }
}

impl DealAnalysisRequest {
    /// Anchored to the stated price even when financing switches to the fallback.
    fn effective_down_payment(&self) -> f64 {
        self.down_payment
            .unwrap_or(self.price * DEFAULT_DOWN_PAYMENT_SHARE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comps: Option<CompsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comps_error: Option<String>,
    pub price_used: f64,
    pub used_fallback_price: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortgage: Option<MortgageResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortgage_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation: Option<RentValuationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valuation_error: Option<String>,
}

/// Runs all three checks; a failure in one section is reported in place
/// without suppressing the others.
pub fn analyze_deal(lookup: &CompsLookup, request: &DealAnalysisRequest) -> DealAnalysis {
    let (comps, comps_error) = match lookup.find_comps(
        &request.address,
        request.max_results,
        &request.preferred_source,
    ) {
        Ok(result) => (Some(result), None),
        Err(err) => (None, Some(err.to_string())),
    };

    let fallback_price = request.fallback_price.unwrap_or(request.price);
    let comps_unpriced = comps.as_ref().is_some_and(|result| {
        !result.results.is_empty()
            && result
                .results
                .iter()
                .all(|record| record.price.map_or(true, |price| price == 0.0))
    });
    let used_fallback_price = comps_unpriced && fallback_price > 0.0;
    let price_used = if used_fallback_price {
        fallback_price
    } else {
        request.price
    };

    let terms = MortgageTerms::new(
        price_used,
        request.effective_down_payment(),
        request.rate_percent,
        request.years,
    )
    .with_escrow(
        request.taxes_month,
        request.insurance_month,
        request.hoa_month,
    )
    .with_rent(request.rent_month);
    let (mortgage, mortgage_error) = match mortgage_summary(&terms) {
        Ok(result) => (Some(result), None),
        Err(err) => (None, Some(err.to_string())),
    };

    let (valuation, valuation_error) = match rent_vs_price(
        request.rent_month,
        request.target_cap_rate,
        request.expense_ratio,
    ) {
        Ok(result) => (Some(result), None),
        Err(err) => (None, Some(err.to_string())),
    };

    DealAnalysis {
        address: request.address.clone(),
        comps,
        comps_error,
        price_used,
        used_fallback_price,
        mortgage,
        mortgage_error,
        valuation,
        valuation_error,
    }
}
