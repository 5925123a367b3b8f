use super::domain::{CompsSource, PropertyRecord};
use super::provider::{lenient_number, CompsProvider, ProviderOutcome};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

const ATTOM_BASE_URL: &str = "https://api.gateway.attomdata.com";
const ATTOM_ADDRESS_PATH: &str = "/propertyapi/v1.0.0/property/address";

/// ATTOM property API client.
pub struct AttomProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AttomProvider {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: ATTOM_BASE_URL.to_string(),
        }
    }

    /// Points the client at another host, e.g. a sandbox or a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, keyword: &str) -> Result<Option<AttomResponse>, reqwest::Error> {
        let url = format!(
            "{}{ATTOM_ADDRESS_PATH}",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header("accept", "application/json")
            .query(&[("address", keyword)])
            .send()?;

        // An unmatched address comes back as 400 "SuccessWithoutResult".
        if response.status() == StatusCode::BAD_REQUEST {
            return Ok(None);
        }
        response.error_for_status()?.json::<AttomResponse>().map(Some)
    }
}

impl std::fmt::Debug for AttomProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttomProvider").finish_non_exhaustive()
    }
}

impl CompsProvider for AttomProvider {
    fn source(&self) -> CompsSource {
        CompsSource::Attom
    }

    fn fetch(&self, keyword: &str, max_results: usize) -> ProviderOutcome {
        match self.request(keyword) {
            Ok(Some(payload)) => outcome_from_payload(payload, max_results),
            Ok(None) => ProviderOutcome::NoUsableData,
            Err(err) => ProviderOutcome::Unreachable(err.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AttomResponse {
    #[serde(default)]
    property: Option<Vec<AttomProperty>>,
}

#[derive(Debug, Default, Deserialize)]
struct AttomProperty {
    #[serde(default)]
    address: Option<AttomAddress>,
    #[serde(default)]
    building: Option<AttomBuilding>,
    #[serde(default)]
    summary: Option<AttomSummary>,
    #[serde(default)]
    sale: Option<AttomSale>,
}

#[derive(Debug, Default, Deserialize)]
struct AttomAddress {
    line1: Option<String>,
    line2: Option<String>,
    locality: Option<String>,
    #[serde(rename = "countrySubd")]
    country_subd: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AttomBuilding {
    bedrooms: Option<Value>,
    bathrooms: Option<Value>,
    #[serde(default)]
    size: Option<AttomSize>,
}

#[derive(Debug, Default, Deserialize)]
struct AttomSize {
    livingsize: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct AttomSummary {
    #[serde(rename = "propLandUse")]
    prop_land_use: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AttomSale {
    amount: Option<Value>,
    #[serde(rename = "saleDate")]
    sale_date: Option<String>,
}

impl AttomProperty {
    fn into_record(self) -> PropertyRecord {
        let address = self.address.unwrap_or_default();
        let building = self.building.unwrap_or_default();
        let sale = self.sale.unwrap_or_default();

        let street = [address.line1.as_deref(), address.line2.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let list_date = sale
            .sale_date
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.summary.and_then(|summary| summary.prop_land_use));

        PropertyRecord {
            address: street.trim().to_string(),
            city: address.locality.unwrap_or_default(),
            state: address.country_subd.unwrap_or_default(),
            beds: building.bedrooms.as_ref().and_then(lenient_number),
            baths: building.bathrooms.as_ref().and_then(lenient_number),
            sqft: building
                .size
                .and_then(|size| size.livingsize)
                .as_ref()
                .and_then(lenient_number),
            price: sale.amount.as_ref().and_then(lenient_number),
            list_date,
        }
    }
}

pub(crate) fn outcome_from_payload(payload: AttomResponse, max_results: usize) -> ProviderOutcome {
    let records: Vec<PropertyRecord> = payload
        .property
        .unwrap_or_default()
        .into_iter()
        .take(max_results)
        .map(AttomProperty::into_record)
        .collect();

    if records.is_empty() {
        ProviderOutcome::NoUsableData
    } else {
        ProviderOutcome::Answered(records)
    }
}
