// src/quote.rs
// Wire contract with the quote endpoint and the blocking HTTP client.
// Field names on the wire follow the server (snake_case, `weight`/`width`
// in product data); the structs carry the widget's own names.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::consts::{HTTP_TIMEOUT_SECS, QUOTE_ENDPOINT_PATH};
use crate::config::options::ProductData;

/// Transport-level failure: connect/timeout, or a body that is not the
/// expected JSON. Application-level failures arrive as a parsed
/// `QuoteResponse` with `success == false` instead.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
pub struct QuoteRequest<'a> {
    pub from_postal_code: &'a str,
    pub to_postal_code: &'a str,
    pub shopify_product: &'a ProductData,
}

/// One carrier option, received verbatim from the API. Ordering from the
/// API is preserved; the first element is displayed as cheapest.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ShippingOption {
    #[serde(default)]
    pub company: String,
    #[serde(rename = "company_logo", default)]
    pub company_logo_url: Option<String>,
    #[serde(rename = "name", default)]
    pub service_name: String,
    #[serde(default)]
    pub formatted_price: String,
    #[serde(rename = "formatted_delivery", default)]
    pub formatted_delivery_estimate: String,
}

impl ShippingOption {
    /// Logo URL, treating an empty wire string as "no logo".
    pub fn logo_url(&self) -> Option<&str> {
        self.company_logo_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Cheapest/fastest designation in the response. The upstream API sends
/// full option objects here; only these three fields are read.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OptionSummary {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub formatted_price: String,
    #[serde(rename = "formatted_delivery", default)]
    pub formatted_delivery_estimate: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct QuoteResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub shipping_options: Vec<ShippingOption>,
    #[serde(default)]
    pub cheapest: Option<OptionSummary>,
    #[serde(default)]
    pub fastest: Option<OptionSummary>,
}

impl QuoteResponse {
    /// The (cheapest, fastest) pair for the summary line — present only
    /// when both entries exist and designate different options.
    pub fn summary_pair(&self) -> Option<(&OptionSummary, &OptionSummary)> {
        match (&self.cheapest, &self.fastest) {
            (Some(c), Some(f)) if c.id != f.id => Some((c, f)),
            _ => None,
        }
    }
}

/// Blocking client for the quote endpoint. Cheap to clone; one request
/// per `calculate` call, no retry.
#[derive(Clone)]
pub struct QuoteClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new(base_url: &str) -> Result<Self, QuoteError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST the quote request and decode the JSON body. HTTP status is
    /// not inspected: the server reports failures in the body, and a
    /// non-JSON body surfaces as a transport error.
    pub fn calculate(&self, req: &QuoteRequest) -> Result<QuoteResponse, QuoteError> {
        let url = format!("{}{}", self.base_url, QUOTE_ENDPOINT_PATH);
        let resp = self.http.post(&url).json(req).send()?;
        Ok(resp.json()?)
    }
}
