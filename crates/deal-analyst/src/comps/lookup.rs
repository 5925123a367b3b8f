use super::attom::AttomProvider;
use super::domain::{CompsResult, CompsSource};
use super::estated::EstatedProvider;
use super::provider::{AttemptStatus, CompsProvider, ProviderOutcome, SourceAttempt};
use super::reference::ReferenceCompsTable;
use super::resolver::ProviderPreference;
use crate::config::ProviderConfig;
use crate::validation::InvalidInput;
use reqwest::blocking::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MIN_KEYWORD_LEN: usize = 3;
pub const DEFAULT_MAX_RESULTS: usize = 3;
pub const MAX_RESULTS_HARD_LIMIT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ProviderSetupError {
    #[error("unable to build HTTP client for comps providers: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Absent or non-positive requests get the default; large ones are capped.
pub fn clamp_max_results(requested: Option<i64>) -> usize {
    match requested {
        Some(value) if value >= 1 => (value as u64).min(MAX_RESULTS_HARD_LIMIT as u64) as usize,
        _ => DEFAULT_MAX_RESULTS,
    }
}

/// Result of a lookup together with the trail of sources that were tried.
#[derive(Debug, Clone, PartialEq)]
pub struct CompsLookupReport {
    pub result: CompsResult,
    pub attempts: Vec<SourceAttempt>,
}

/// Multi-source comps search with reference-table fallback.
///
/// Only sources with a registered provider are queried, so the set of
/// configured credentials decides which remote sources take part.
#[derive(Debug, Clone)]
pub struct CompsLookup {
    table: Arc<ReferenceCompsTable>,
    providers: BTreeMap<CompsSource, Arc<dyn CompsProvider>>,
}

impl CompsLookup {
    pub fn new(table: Arc<ReferenceCompsTable>) -> Self {
        Self {
            table,
            providers: BTreeMap::new(),
        }
    }

    /// Registers HTTP providers for every source whose credential is set.
    pub fn from_config(
        config: &ProviderConfig,
        table: Arc<ReferenceCompsTable>,
    ) -> Result<Self, ProviderSetupError> {
        let mut lookup = Self::new(table);
        if !config.credentials.any_configured() {
            return Ok(lookup);
        }

        let client = Client::builder().timeout(config.request_timeout).build()?;
        if let Some(key) = &config.credentials.attom_api_key {
            lookup = lookup.with_provider(AttomProvider::new(client.clone(), key.clone()));
        }
        if let Some(token) = &config.credentials.estated_api_key {
            lookup = lookup.with_provider(EstatedProvider::new(client, token.clone()));
        }
        Ok(lookup)
    }

    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: CompsProvider + 'static,
    {
        let source = provider.source();
        if source.is_remote() {
            self.providers.insert(source, Arc::new(provider));
        }
        self
    }

    pub fn enabled_sources(&self) -> Vec<CompsSource> {
        self.providers.keys().copied().collect()
    }

    pub fn reference_table(&self) -> &ReferenceCompsTable {
        &self.table
    }

    pub fn find_comps(
        &self,
        keyword: &str,
        max_results: Option<i64>,
        preferred_source: &str,
    ) -> Result<CompsResult, InvalidInput> {
        self.lookup(keyword, max_results, preferred_source)
            .map(|report| report.result)
    }

    pub fn lookup(
        &self,
        keyword: &str,
        max_results: Option<i64>,
        preferred_source: &str,
    ) -> Result<CompsLookupReport, InvalidInput> {
        if keyword.trim().chars().count() < MIN_KEYWORD_LEN {
            return Err(InvalidInput::KeywordTooShort {
                min: MIN_KEYWORD_LEN,
            });
        }

        let keyword = keyword.trim();
        let limit = clamp_max_results(max_results);
        let order = ProviderPreference::parse(preferred_source).source_order();
        let mut attempts = Vec::with_capacity(order.len());

        for &source in order {
            if !source.is_remote() {
                break;
            }

            let Some(provider) = self.providers.get(&source) else {
                debug!(%source, "comps source not configured, skipping");
                attempts.push(SourceAttempt {
                    source,
                    status: AttemptStatus::Skipped,
                });
                continue;
            };

            let status = match provider.fetch(keyword, limit) {
                ProviderOutcome::Unreachable(reason) => {
                    warn!(%source, %reason, "comps source unreachable");
                    AttemptStatus::Unreachable
                }
                outcome => match outcome.usable_records() {
                    Some(mut records) => {
                        records.truncate(limit);
                        attempts.push(SourceAttempt {
                            source,
                            status: AttemptStatus::Hit,
                        });
                        info!(%source, count = records.len(), "comps answered by remote source");
                        return Ok(CompsLookupReport {
                            result: CompsResult::new(source, records),
                            attempts,
                        });
                    }
                    None => {
                        debug!(%source, "comps source returned no usable data");
                        AttemptStatus::NoUsableData
                    }
                },
            };
            attempts.push(SourceAttempt { source, status });
        }

        let matches = self.table.search(keyword, limit);
        info!(count = matches.len(), "comps answered by reference table");
        Ok(CompsLookupReport {
            result: CompsResult::new(CompsSource::Demo, matches),
            attempts,
        })
    }
}
