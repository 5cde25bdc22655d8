//! HTTP client for the Google Sheets v4 REST API.
//!
//! Covers only what publishing needs: listing tab titles, adding a tab,
//! clearing a range and writing a block of values. Every call is retried
//! with back-off on rate limiting, server errors and network failures.

use std::time::Duration;

use etsy_stats_core::SheetsConfig;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::SheetsError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// Client bound to one spreadsheet.
///
/// Use [`SheetsClient::new`] for production or
/// [`SheetsClient::with_base_url`] to point at a mock server in tests.
pub struct SheetsClient {
    client: Client,
    access_token: String,
    spreadsheet_id: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("access_token", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

impl SheetsClient {
    /// Creates a client for the production API from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::MissingConfig`] when the spreadsheet id or
    /// access token is unset, or [`SheetsError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(config: &SheetsConfig) -> Result<Self, SheetsError> {
        let spreadsheet_id = config
            .spreadsheet_id
            .as_deref()
            .ok_or(SheetsError::MissingConfig("ETSY_STATS_SPREADSHEET_ID"))?;
        let access_token = config
            .access_token
            .as_deref()
            .ok_or(SheetsError::MissingConfig("GOOGLE_SHEETS_ACCESS_TOKEN"))?;

        Self::with_base_url(
            spreadsheet_id,
            access_token,
            config.request_timeout_secs,
            config.max_retries,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SheetsError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        spreadsheet_id: &str,
        access_token: &str,
        timeout_secs: u64,
        max_retries: u32,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("etsy-stats/0.1")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SheetsError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            spreadsheet_id: spreadsheet_id.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides the back-off base delay. Tests use `0`.
    #[must_use]
    pub fn with_backoff_base_ms(mut self, backoff_base_ms: u64) -> Self {
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Titles of every tab in the spreadsheet, in sheet order.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] on HTTP, API or decoding failure.
    pub async fn list_tab_titles(&self) -> Result<Vec<String>, SheetsError> {
        let mut url = self.spreadsheet_url(&[]);
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let body = self.send("list tabs", Method::GET, url, None).await?;
        let metadata: SpreadsheetMetadata =
            serde_json::from_value(body).map_err(|e| SheetsError::Deserialize {
                context: "spreadsheet metadata".to_owned(),
                source: e,
            })?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    /// Adds an empty tab named `title`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] on HTTP or API failure, including when the
    /// tab already exists.
    pub async fn add_tab(&self, title: &str) -> Result<(), SheetsError> {
        let segment = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.spreadsheet_url(&[segment.as_str()]);
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        self.send("add tab", Method::POST, url, Some(body)).await?;
        tracing::info!(tab = title, "created spreadsheet tab");
        Ok(())
    }

    /// Clears every value in `range` (A1 notation).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] on HTTP or API failure.
    pub async fn clear_range(&self, range: &str) -> Result<(), SheetsError> {
        let url = self.values_url(&format!("{range}:clear"));
        self.send("clear range", Method::POST, url, Some(json!({})))
            .await?;
        Ok(())
    }

    /// Writes `values` row-major into `range`, letting Sheets interpret
    /// them as if typed (numbers, formulas).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] on HTTP or API failure.
    pub async fn update_range(&self, range: &str, values: Vec<Vec<Value>>) -> Result<(), SheetsError> {
        let mut url = self.values_url(range);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": values,
        });
        self.send("update range", Method::PUT, url, Some(body))
            .await?;
        Ok(())
    }

    /// `{base}v4/spreadsheets/{id}` or, with `tail`, the id segment
    /// replaced by the given segments.
    fn spreadsheet_url(&self, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v4", "spreadsheets"]);
            if tail.is_empty() {
                segments.push(&self.spreadsheet_id);
            } else {
                segments.extend(tail);
            }
        }
        url
    }

    fn values_url(&self, range: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        }
        url
    }

    async fn send(
        &self,
        operation: &str,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Value, SheetsError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let request = self.request(method.clone(), url.clone(), body.as_ref());
            async move {
                let response = request.send().await?;
                let status = response.status();
                let text = response.text().await?;

                if !status.is_success() {
                    return Err(SheetsError::Api {
                        operation: operation.to_owned(),
                        status: status.as_u16(),
                        message: api_error_message(&text),
                    });
                }

                if text.trim().is_empty() {
                    return Ok(Value::Null);
                }
                serde_json::from_str(&text).map_err(|e| SheetsError::Deserialize {
                    context: operation.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }

    fn request(&self, method: Method, url: Url, body: Option<&Value>) -> RequestBuilder {
        let request = self
            .client
            .request(method, url)
            .bearer_auth(&self.access_token);
        match body {
            Some(body) => request.json(body),
            None => request,
        }
    }
}

/// `error.message` from a Google API error body, or the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_owned())
}

/// Spreadsheet column letter for a 1-based column index: 1 → `A`,
/// 26 → `Z`, 27 → `AA`. Index 0 maps to `A`.
#[must_use]
pub fn column_letter(index: usize) -> String {
    let mut n = index.max(1);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1 range on `tab`, quoting the tab name. `cells` is `"A1:ZZ"`-style.
#[must_use]
pub fn a1_range(tab: &str, cells: &str) -> String {
    format!("'{}'!{cells}", tab.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SheetsClient {
        SheetsClient::with_base_url("sheet-1", "token", 30, 0, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn column_letters_are_bijective_base_26() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(22), "V");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(53), "BA");
        assert_eq!(column_letter(702), "ZZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn a1_range_quotes_and_escapes_tab_name() {
        assert_eq!(a1_range("Shop - Stats", "A1:ZZ"), "'Shop - Stats'!A1:ZZ");
        assert_eq!(a1_range("Bob's Shop", "A1:B2"), "'Bob''s Shop'!A1:B2");
    }

    #[test]
    fn spreadsheet_url_handles_trailing_slash() {
        let client = test_client("http://localhost:1234/");
        assert_eq!(
            client.spreadsheet_url(&[]).as_str(),
            "http://localhost:1234/v4/spreadsheets/sheet-1"
        );
        assert_eq!(
            client.spreadsheet_url(&["sheet-1:batchUpdate"]).as_str(),
            "http://localhost:1234/v4/spreadsheets/sheet-1:batchUpdate"
        );
    }

    #[test]
    fn values_url_encodes_spaces_in_range() {
        let client = test_client("http://localhost:1234");
        let url = client.values_url("'Shop - Stats'!A1:ZZ:clear");
        assert_eq!(
            url.path(),
            "/v4/spreadsheets/sheet-1/values/'Shop%20-%20Stats'!A1:ZZ:clear"
        );
    }

    #[test]
    fn new_requires_spreadsheet_id_and_token() {
        let config = SheetsConfig {
            spreadsheet_id: None,
            access_token: Some("t".to_owned()),
            request_timeout_secs: 30,
            max_retries: 3,
        };
        assert!(matches!(
            SheetsClient::new(&config),
            Err(SheetsError::MissingConfig("ETSY_STATS_SPREADSHEET_ID"))
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let client = test_client("http://localhost:1234");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("token\""));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn api_error_message_prefers_google_error_body() {
        let body = r#"{"error":{"code":400,"message":"Unable to parse range"}}"#;
        assert_eq!(api_error_message(body), "Unable to parse range");
        assert_eq!(api_error_message("  gateway  "), "gateway");
    }
}
