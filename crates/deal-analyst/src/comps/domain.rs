use serde::{Deserialize, Serialize};
use std::fmt;

/// Data sources that can answer a comps lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompsSource {
    Attom,
    Estated,
    /// The bundled reference table.
    #[serde(rename = "demo_csv")]
    Demo,
}

impl CompsSource {
    pub const fn label(self) -> &'static str {
        match self {
            CompsSource::Attom => "attom",
            CompsSource::Estated => "estated",
            CompsSource::Demo => "demo_csv",
        }
    }

    pub const fn is_remote(self) -> bool {
        !matches!(self, CompsSource::Demo)
    }
}

impl fmt::Display for CompsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single comparable property, normalized across sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub beds: Option<f64>,
    #[serde(default)]
    pub baths: Option<f64>,
    #[serde(default)]
    pub sqft: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub list_date: Option<String>,
}

impl PropertyRecord {
    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }
}

/// Envelope returned by every comps lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompsResult {
    pub count: usize,
    pub source: CompsSource,
    pub results: Vec<PropertyRecord>,
}

impl CompsResult {
    pub fn new(source: CompsSource, results: Vec<PropertyRecord>) -> Self {
        Self {
            count: results.len(),
            source,
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
