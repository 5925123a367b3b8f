//! Comparable-property lookup across remote data sources with a bundled
//! reference table as the last resort.

mod attom;
pub mod domain;
mod estated;
pub mod lookup;
pub mod provider;
pub mod reference;
pub mod resolver;
#[cfg(test)]
mod stub_http;

pub use attom::AttomProvider;
pub use domain::{CompsResult, CompsSource, PropertyRecord};
pub use estated::EstatedProvider;
pub use lookup::{
    clamp_max_results, CompsLookup, CompsLookupReport, ProviderSetupError, DEFAULT_MAX_RESULTS,
    MAX_RESULTS_HARD_LIMIT, MIN_KEYWORD_LEN,
};
pub use provider::{AttemptStatus, CompsProvider, ProviderOutcome, SourceAttempt};
pub use reference::{ReferenceCompsTable, ReferenceTableError};
pub use resolver::{resolve, ProviderPreference};
