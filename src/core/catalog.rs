//! Element catalog lookups
//!
//! The catalog service answers one design id per request with a list of
//! "brick" records, one per color the design is sold in. [`CatalogClient`]
//! is the seam the resolver talks to; [`HttpCatalogClient`] is the real
//! network implementation.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::core::error::ReconcileError;

pub const DEFAULT_ENDPOINT: &str = "https://www.lego.com/en-US/service/rpservice/getitemordesign";
pub const DEFAULT_AGE: &str = "25";
pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("slopes/", env!("CARGO_PKG_VERSION"));

/// One (design, color) element as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickRecord {
    #[serde(rename = "DesignId", deserialize_with = "design_id_from_any")]
    pub design_id: u32,
    #[serde(rename = "ItemDescr")]
    pub description: String,
    #[serde(rename = "MaingroupDescr")]
    pub category: String,
    #[serde(rename = "ColourDescr")]
    pub color: String,
    #[serde(rename = "ItemNo", deserialize_with = "string_from_any")]
    pub element_id: String,
    #[serde(rename = "Asset")]
    pub asset: String,
}

/// Raw lookup payload for one design id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(rename = "Bricks", default)]
    pub bricks: Vec<BrickRecord>,
}

/// Fetches the raw catalog payload for a design id
pub trait CatalogClient {
    fn fetch(&self, design_id: u32) -> Result<LookupResponse, ReconcileError>;
}

impl<C: CatalogClient + ?Sized> CatalogClient for &C {
    fn fetch(&self, design_id: u32) -> Result<LookupResponse, ReconcileError> {
        (**self).fetch(design_id)
    }
}

/// Blocking HTTP client for the catalog service. Never retries.
pub struct HttpCatalogClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    cookie: String,
}

impl HttpCatalogClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ReconcileError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ReconcileError::HttpClient)?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            cookie: age_country_cookie(DEFAULT_AGE, DEFAULT_COUNTRY),
        })
    }

    /// Set the age/region context sent with every request
    pub fn with_region(mut self, age: &str, country: &str) -> Self {
        self.cookie = age_country_cookie(age, country);
        self
    }
}

impl CatalogClient for HttpCatalogClient {
    fn fetch(&self, design_id: u32) -> Result<LookupResponse, ReconcileError> {
        let lookup_err = |message: String| ReconcileError::Lookup { design_id, message };

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("itemordesignnumber", design_id.to_string()),
                ("issalesflow", "false".to_string()),
            ])
            .header(reqwest::header::COOKIE, &self.cookie)
            .send()
            .map_err(|e| lookup_err(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(lookup_err(format!("HTTP {}", status.as_u16())));
        }

        let body = resp.text().map_err(|e| lookup_err(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| lookup_err(format!("invalid response: {}", e)))
    }
}

fn age_country_cookie(age: &str, country: &str) -> String {
    let context = serde_json::json!({ "age": age, "countrycode": country });
    format!("csAgeAndCountry={}", context)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn string_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

fn design_id_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn brick_json(design_id: u32, color: &str, element_id: u64) -> serde_json::Value {
        serde_json::json!({
            "DesignId": design_id,
            "ItemDescr": "ROOF TILE 1X2/45°",
            "MaingroupDescr": "BRICKS WITH SLOPE",
            "ColourDescr": color,
            "ItemNo": element_id,
            "Asset": format!("/bricks/5/2/{}", element_id),
        })
    }

    #[test]
    fn test_decode_numeric_and_string_ids() {
        let body = r#"{"Bricks": [
            {"DesignId": 3040, "ItemDescr": "A", "MaingroupDescr": "B",
             "ColourDescr": "BLACK", "ItemNo": 304026, "Asset": "/bricks/5/2/304026"},
            {"DesignId": "3040", "ItemDescr": "A", "MaingroupDescr": "B",
             "ColourDescr": "WHITE", "ItemNo": "304001", "Asset": "/bricks/5/2/304001"}
        ]}"#;

        let resp: LookupResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.bricks.len(), 2);
        assert_eq!(resp.bricks[0].design_id, 3040);
        assert_eq!(resp.bricks[0].element_id, "304026");
        assert_eq!(resp.bricks[1].design_id, 3040);
        assert_eq!(resp.bricks[1].element_id, "304001");
    }

    #[test]
    fn test_decode_missing_bricks_is_empty() {
        let resp: LookupResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.bricks.is_empty());
    }

    #[test]
    fn test_cookie_format() {
        assert_eq!(
            age_country_cookie("25", "US"),
            r#"csAgeAndCountry={"age":"25","countrycode":"US"}"#
        );
    }

    #[test]
    fn test_http_fetch_sends_lookup_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/getitemordesign")
                .query_param("itemordesignnumber", "3040")
                .query_param("issalesflow", "false")
                .header_exists("cookie");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "Bricks": [brick_json(3040, "BRICK-YEL", 4121921)] }));
        });

        let client =
            HttpCatalogClient::new(&server.url("/getitemordesign"), Duration::from_secs(5)).unwrap();
        let resp = client.fetch(3040).unwrap();

        mock.assert();
        assert_eq!(resp.bricks.len(), 1);
        assert_eq!(resp.bricks[0].color, "BRICK-YEL");
        assert_eq!(resp.bricks[0].element_id, "4121921");
    }

    #[test]
    fn test_http_fetch_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/getitemordesign");
            then.status(503);
        });

        let client =
            HttpCatalogClient::new(&server.url("/getitemordesign"), Duration::from_secs(5)).unwrap();
        let err = client.fetch(3040).unwrap_err();

        assert!(matches!(
            err,
            ReconcileError::Lookup { design_id: 3040, ref message } if message.contains("503")
        ));
    }

    #[test]
    fn test_http_fetch_invalid_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/getitemordesign");
            then.status(200).body("<html>maintenance</html>");
        });

        let client =
            HttpCatalogClient::new(&server.url("/getitemordesign"), Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.fetch(3040),
            Err(ReconcileError::Lookup { .. })
        ));
    }

    #[test]
    fn test_client_build_error_names_no_design() {
        let source = reqwest::blocking::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let err = ReconcileError::HttpClient(source);

        assert!(err.to_string().starts_with("Failed to build HTTP client"));
        assert!(!err.to_string().contains("design id"));
    }
}
