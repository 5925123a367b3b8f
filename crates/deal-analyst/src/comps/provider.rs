use super::domain::{CompsSource, PropertyRecord};
use serde_json::Value;
use std::fmt::Debug;

/// What a remote source produced for a single query.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// The source returned records; usability is judged by the lookup.
    Answered(Vec<PropertyRecord>),
    NoUsableData,
    Unreachable(String),
}

impl ProviderOutcome {
    /// Records are usable once at least one of them carries a price.
    pub fn usable_records(self) -> Option<Vec<PropertyRecord>> {
        match self {
            ProviderOutcome::Answered(records) if records.iter().any(PropertyRecord::has_price) => {
                Some(records)
            }
            _ => None,
        }
    }
}

/// Remote comps backend. Implementations must never panic on bad payloads;
/// every failure maps to a `ProviderOutcome`.
pub trait CompsProvider: Debug + Send + Sync {
    fn source(&self) -> CompsSource;
    fn fetch(&self, keyword: &str, max_results: usize) -> ProviderOutcome;
}

/// How a single source attempt ended, kept for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Hit,
    NoUsableData,
    Unreachable,
    /// No credential configured, so the source was not queried.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceAttempt {
    pub source: CompsSource,
    pub status: AttemptStatus,
}

/// Remote payloads mix JSON numbers and numeric strings for the same field.
pub(crate) fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(price: Option<f64>) -> PropertyRecord {
        PropertyRecord {
            address: "12 Main St".to_string(),
            city: "Forney".to_string(),
            state: "TX".to_string(),
            beds: Some(3.0),
            baths: Some(2.0),
            sqft: None,
            price,
            list_date: None,
        }
    }

    #[test]
    fn answered_records_need_a_price_to_be_usable() {
        let priced = ProviderOutcome::Answered(vec![record(None), record(Some(250_000.0))]);
        assert_eq!(priced.usable_records().map(|records| records.len()), Some(2));

        let unpriced = ProviderOutcome::Answered(vec![record(None)]);
        assert!(unpriced.usable_records().is_none());
        assert!(ProviderOutcome::Answered(Vec::new()).usable_records().is_none());
        assert!(ProviderOutcome::NoUsableData.usable_records().is_none());
        assert!(ProviderOutcome::Unreachable("timeout".to_string())
            .usable_records()
            .is_none());
    }

    #[test]
    fn lenient_number_accepts_numbers_and_numeric_strings() {
        assert_eq!(lenient_number(&json!(3)), Some(3.0));
        assert_eq!(lenient_number(&json!("2.5")), Some(2.5));
        assert_eq!(lenient_number(&json!("1,250")), Some(1250.0));
        assert_eq!(lenient_number(&json!("n/a")), None);
        assert_eq!(lenient_number(&json!(null)), None);
    }
}
