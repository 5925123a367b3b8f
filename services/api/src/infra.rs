use deal_analyst::comps::{CompsLookup, ReferenceCompsTable};
use deal_analyst::config::AppConfig;
use deal_analyst::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) lookup: Arc<CompsLookup>,
}

/// Loads the reference table once and registers a provider per configured key.
pub(crate) fn build_lookup(config: &AppConfig) -> Result<CompsLookup, AppError> {
    let table = ReferenceCompsTable::from_path(&config.reference.comps_csv)?;
    info!(
        path = %config.reference.comps_csv.display(),
        records = table.len(),
        "reference comps loaded"
    );

    let lookup = CompsLookup::from_config(&config.providers, Arc::new(table))?;
    info!(sources = ?lookup.enabled_sources(), "remote comps sources enabled");
    Ok(lookup)
}

pub(crate) fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("unable to serialize result: {err}"),
    }
}

pub(crate) fn format_money(value: f64) -> String {
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && rounded > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
