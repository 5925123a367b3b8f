use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use deal_analyst::analysis::{analyze_deal, DealAnalysis, DealAnalysisRequest};
use deal_analyst::comps::CompsResult;
use deal_analyst::error::AppError;
use deal_analyst::finance::{
    mortgage_summary, rent_vs_price, MortgageResult, MortgageTerms, RentValuationResult,
    DEFAULT_EXPENSE_RATIO, DEFAULT_TARGET_CAP_RATE,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct CompsRequest {
    pub(crate) keyword: String,
    #[serde(default)]
    pub(crate) max_results: Option<i64>,
    #[serde(default = "default_source")]
    pub(crate) preferred_source: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RentValuationRequest {
    pub(crate) rent_month: f64,
    #[serde(default = "default_cap_rate")]
    pub(crate) target_cap_rate: f64,
    #[serde(default = "default_expense_ratio")]
    pub(crate) expense_ratio: f64,
}

fn default_source() -> String {
    "auto".to_string()
}

fn default_cap_rate() -> f64 {
    DEFAULT_TARGET_CAP_RATE
}

fn default_expense_ratio() -> f64 {
    DEFAULT_EXPENSE_RATIO
}

pub(crate) fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/comps", post(comps_endpoint))
        .route("/api/v1/mortgage", post(mortgage_endpoint))
        .route("/api/v1/rent-valuation", post(rent_valuation_endpoint))
        .route("/api/v1/deal/analyze", post(deal_analysis_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

// Remote lookups block on HTTP, so they run on the blocking pool.
pub(crate) async fn comps_endpoint(
    State(state): State<AppState>,
    Json(request): Json<CompsRequest>,
) -> Result<Json<CompsResult>, AppError> {
    let lookup = state.lookup.clone();
    let result = tokio::task::spawn_blocking(move || {
        lookup.find_comps(
            &request.keyword,
            request.max_results,
            &request.preferred_source,
        )
    })
    .await
    .map_err(|err| AppError::Task(err.to_string()))??;

    Ok(Json(result))
}

pub(crate) async fn mortgage_endpoint(
    Json(terms): Json<MortgageTerms>,
) -> Result<Json<MortgageResult>, AppError> {
    Ok(Json(mortgage_summary(&terms)?))
}

pub(crate) async fn rent_valuation_endpoint(
    Json(request): Json<RentValuationRequest>,
) -> Result<Json<RentValuationResult>, AppError> {
    let result = rent_vs_price(
        request.rent_month,
        request.target_cap_rate,
        request.expense_ratio,
    )?;
    Ok(Json(result))
}

pub(crate) async fn deal_analysis_endpoint(
    State(state): State<AppState>,
    Json(request): Json<DealAnalysisRequest>,
) -> Result<Json<DealAnalysis>, AppError> {
    let lookup = state.lookup.clone();
    let analysis = tokio::task::spawn_blocking(move || analyze_deal(&lookup, &request))
        .await
        .map_err(|err| AppError::Task(err.to_string()))?;

    Ok(Json(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use deal_analyst::comps::{CompsLookup, CompsSource, PropertyRecord, ReferenceCompsTable};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn sample_state(ready: bool) -> AppState {
        let table = ReferenceCompsTable::new(vec![
            PropertyRecord {
                address: "1184 Lavaca Dr, Forney, TX 75126".to_string(),
                city: "Forney".to_string(),
                state: "TX".to_string(),
                beds: Some(4.0),
                baths: Some(2.5),
                sqft: Some(2_150.0),
                price: Some(349_900.0),
                list_date: Some("2024-03-02".to_string()),
            },
            PropertyRecord {
                address: "2902 Sharp Pl, Mesquite, TX 75149".to_string(),
                city: "Mesquite".to_string(),
                state: "TX".to_string(),
                beds: Some(3.0),
                baths: Some(2.0),
                sqft: None,
                price: None,
                list_date: None,
            },
        ]);

        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            lookup: Arc::new(CompsLookup::new(Arc::new(table))),
        }
    }

    async fn post_json(
        state: AppState,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");

        let response = api_router(state)
            .oneshot(request)
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload = serde_json::from_slice(&bytes).expect("json body");
        (status, payload)
    }

    #[tokio::test]
    async fn comps_endpoint_falls_back_to_reference_table() {
        let request = CompsRequest {
            keyword: "forney".to_string(),
            max_results: Some(999),
            preferred_source: "auto".to_string(),
        };

        let Json(body) = comps_endpoint(State(sample_state(true)), Json(request))
            .await
            .expect("lookup succeeds");

        assert_eq!(body.source, CompsSource::Demo);
        assert_eq!(body.count, 1);
    }

    #[tokio::test]
    async fn comps_route_rejects_short_keyword() {
        let (status, body) = post_json(
            sample_state(true),
            "/api/v1/comps",
            json!({ "keyword": "ab" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("at least 3 characters"));
    }

    #[tokio::test]
    async fn mortgage_route_returns_summary() {
        let (status, body) = post_json(
            sample_state(true),
            "/api/v1/mortgage",
            json!({
                "price": 350000,
                "down_payment": 70000,
                "rate_percent": 6.5,
                "years": 30,
                "taxes_month": 350,
                "insurance_month": 120,
                "rent_month": 2400
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loan_amount"], 280000.0);
        assert_eq!(body["ltv_percent"], 80.0);
        assert_eq!(body["cashflow"], 160.21);
        assert_eq!(body["inputs"]["hoa_month"], 0.0);
    }

    #[tokio::test]
    async fn mortgage_route_rejects_down_payment_above_price() {
        let (status, body) = post_json(
            sample_state(true),
            "/api/v1/mortgage",
            json!({ "price": 100, "down_payment": 200, "rate_percent": 6.5, "years": 30 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("cannot exceed price"));
    }

    #[tokio::test]
    async fn rent_valuation_uses_default_assumptions() {
        let request = RentValuationRequest {
            rent_month: 2_400.0,
            target_cap_rate: default_cap_rate(),
            expense_ratio: default_expense_ratio(),
        };

        let Json(body) = rent_valuation_endpoint(Json(request))
            .await
            .expect("valuation succeeds");

        assert_eq!(body.noi, 18_720.0);
        assert_eq!(body.implied_value, 374_400.0);
    }

    #[tokio::test]
    async fn deal_analysis_route_reports_every_section() {
        let (status, body) = post_json(
            sample_state(true),
            "/api/v1/deal/analyze",
            json!({ "address": "Lavaca Dr" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["comps"]["source"], "demo_csv");
        assert_eq!(body["comps"]["count"], 1);
        assert_eq!(body["used_fallback_price"], false);
        assert_eq!(body["mortgage"]["down_payment"], 70000.0);
        assert_eq!(body["valuation"]["implied_value"], 374400.0);
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = readiness_endpoint(State(sample_state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(State(sample_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
