use super::domain::{CompsSource, PropertyRecord};
use super::provider::{lenient_number, CompsProvider, ProviderOutcome};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

const ESTATED_BASE_URL: &str = "https://api.estated.com";
const ESTATED_PROPERTY_PATH: &str = "/property/v3";

/// Estated property API client. Each query resolves to at most one property.
pub struct EstatedProvider {
    client: Client,
    token: String,
    base_url: String,
}

impl EstatedProvider {
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: ESTATED_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, keyword: &str) -> Result<EstatedResponse, reqwest::Error> {
        let url = format!(
            "{}{ESTATED_PROPERTY_PATH}",
            self.base_url.trim_end_matches('/')
        );
        self.client
            .get(url)
            .query(&[("token", self.token.as_str()), ("address", keyword)])
            .send()?
            .error_for_status()?
            .json::<EstatedResponse>()
    }
}

impl std::fmt::Debug for EstatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstatedProvider").finish_non_exhaustive()
    }
}

impl CompsProvider for EstatedProvider {
    fn source(&self) -> CompsSource {
        CompsSource::Estated
    }

    fn fetch(&self, keyword: &str, _max_results: usize) -> ProviderOutcome {
        match self.request(keyword) {
            Ok(payload) => outcome_from_payload(payload),
            Err(err) => ProviderOutcome::Unreachable(err.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EstatedResponse {
    #[serde(default)]
    data: Option<EstatedProperty>,
}

#[derive(Debug, Default, Deserialize)]
struct EstatedProperty {
    #[serde(default)]
    address: Option<EstatedAddress>,
    #[serde(default)]
    structure: Option<EstatedStructure>,
    #[serde(default)]
    valuation: Option<EstatedValuation>,
    #[serde(default)]
    sales: Option<Vec<EstatedSale>>,
}

#[derive(Debug, Default, Deserialize)]
struct EstatedAddress {
    street_number: Option<String>,
    street_name: Option<String>,
    street_suffix: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

impl EstatedAddress {
    fn street_line(&self) -> String {
        [
            self.street_number.as_deref(),
            self.street_name.as_deref(),
            self.street_suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Default, Deserialize)]
struct EstatedStructure {
    beds: Option<Value>,
    baths: Option<Value>,
    square_feet: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct EstatedValuation {
    value: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct EstatedSale {
    sale_date: Option<String>,
}

pub(crate) fn outcome_from_payload(payload: EstatedResponse) -> ProviderOutcome {
    let Some(data) = payload.data else {
        return ProviderOutcome::NoUsableData;
    };

    let address = data.address.unwrap_or_default();
    let structure = data.structure.unwrap_or_default();
    let price = data
        .valuation
        .and_then(|valuation| valuation.value)
        .as_ref()
        .and_then(lenient_number);
    let list_date = data
        .sales
        .and_then(|sales| sales.into_iter().next())
        .and_then(|sale| sale.sale_date);

    let record = PropertyRecord {
        address: address.street_line(),
        city: address.city.unwrap_or_default(),
        state: address.state.unwrap_or_default(),
        beds: structure.beds.as_ref().and_then(lenient_number),
        baths: structure.baths.as_ref().and_then(lenient_number),
        sqft: structure.square_feet.as_ref().and_then(lenient_number),
        price,
        list_date,
    };

    ProviderOutcome::Answered(vec![record])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comps::stub_http::{closed_port, serve_once, test_client};
    use serde_json::json;

    fn payload(value: Value) -> EstatedResponse {
        serde_json::from_value(value).expect("payload deserializes")
    }

    #[test]
    fn maps_single_property() {
        let body = payload(json!({
            "data": {
                "address": {
                    "street_number": "1184",
                    "street_name": "LAVACA",
                    "street_suffix": "DR",
                    "city": "FORNEY",
                    "state": "TX"
                },
                "structure": { "beds": 4, "baths": 2.5, "square_feet": 2150 },
                "valuation": { "value": 351000 },
                "sales": [
                    { "sale_date": "2021-06-11" },
                    { "sale_date": "2015-02-01" }
                ]
            }
        }));

        let ProviderOutcome::Answered(records) = outcome_from_payload(body) else {
            panic!("expected answered outcome");
        };
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.address, "1184 LAVACA DR");
        assert_eq!(record.city, "FORNEY");
        assert_eq!(record.sqft, Some(2150.0));
        assert_eq!(record.price, Some(351_000.0));
        assert_eq!(record.list_date.as_deref(), Some("2021-06-11"));
    }

    #[test]
    fn missing_data_is_no_usable_data() {
        let body = payload(json!({ "data": null, "warnings": [] }));
        assert_eq!(outcome_from_payload(body), ProviderOutcome::NoUsableData);
    }

    #[test]
    fn property_without_valuation_is_answered_but_unpriced() {
        let body = payload(json!({
            "data": { "address": { "street_name": "MAIN" }, "sales": [] }
        }));

        let outcome = outcome_from_payload(body);
        assert!(outcome.clone().usable_records().is_none());
        let ProviderOutcome::Answered(records) = outcome else {
            panic!("expected answered outcome");
        };
        assert_eq!(records[0].address, "MAIN");
        assert!(records[0].list_date.is_none());
    }

    #[test]
    fn refused_connection_is_unreachable() {
        let provider = EstatedProvider::new(test_client(), "token").with_base_url(closed_port());
        assert!(matches!(
            provider.fetch("Forney", 3),
            ProviderOutcome::Unreachable(_)
        ));
    }

    #[test]
    fn non_json_body_is_unreachable() {
        let base = serve_once("200 OK", "text/plain", "rate limited, try later");
        let provider = EstatedProvider::new(test_client(), "token").with_base_url(base);
        assert!(matches!(
            provider.fetch("Forney", 3),
            ProviderOutcome::Unreachable(_)
        ));
    }

    #[test]
    fn fetch_parses_live_response() {
        let base = serve_once(
            "200 OK",
            "application/json",
            r#"{"data":{"address":{"street_name":"LAVACA"},"valuation":{"value":351000}}}"#,
        );
        let provider = EstatedProvider::new(test_client(), "token").with_base_url(base);

        let records = provider
            .fetch("Lavaca", 3)
            .usable_records()
            .expect("priced record");
        assert_eq!(records[0].price, Some(351_000.0));
    }
}
