//! Residential deal analysis: comparable-property lookup with multi-source
//! fallback, mortgage/cashflow math and rent-based valuation.

pub mod analysis;
pub mod comps;
pub mod config;
pub mod error;
pub mod finance;
pub mod telemetry;
pub mod validation;

pub use analysis::{analyze_deal, DealAnalysis, DealAnalysisRequest};
pub use comps::{CompsLookup, CompsResult, CompsSource, PropertyRecord, ReferenceCompsTable};
pub use finance::{
    mortgage_summary, rent_vs_price, MortgageResult, MortgageTerms, RentValuationResult,
};
pub use validation::InvalidInput;
