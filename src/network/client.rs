//! HTTP client wrapper - the REST expense API behind `ExpenseStore`

use serde::de::DeserializeOwned;

use crate::constants::{APP_NAME, APP_VERSION, TOTAL_MONTH_PATH};
use crate::error::ApiError;
use crate::models::{Expense, ExpenseId, NewExpense, Period};
use crate::network::store::ExpenseStore;

/// Client for the expense resource rooted at `base_url`
#[derive(Clone, Debug)]
pub struct ExpenseClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExpenseClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(create_client(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        ExpenseClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single expense. The id is appended as one percent-encoded
    /// path segment, so reserved characters stay inside the segment.
    fn item_url(&self, id: &ExpenseId) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Delete(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Delete(format!("Base URL cannot have a path: {}", self.base_url)))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    fn total_url(&self) -> String {
        format!("{}/{}", self.base_url, TOTAL_MONTH_PATH)
    }
}

impl ExpenseStore for ExpenseClient {
    async fn list(&self) -> Result<Vec<Expense>, ApiError> {
        let resp = send(self.http.get(&self.base_url), ApiError::Fetch).await?;
        decode(resp, ApiError::Fetch).await
    }

    async fn create(&self, input: &NewExpense) -> Result<Expense, ApiError> {
        let resp = send(self.http.post(&self.base_url).json(input), ApiError::Create).await?;
        decode(resp, ApiError::Create).await
    }

    async fn remove(&self, id: &ExpenseId) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        send(self.http.delete(url), ApiError::Delete).await?;
        Ok(())
    }

    async fn monthly_total(&self, period: Period) -> Result<f64, ApiError> {
        let query = [
            ("year", period.year.to_string()),
            ("month", period.month.to_string()),
        ];
        let resp = send(self.http.get(self.total_url()).query(&query), ApiError::TotalFetch).await?;
        decode(resp, ApiError::TotalFetch).await
    }
}

/// Send a request; transport failures and non-2xx statuses (204 included in
/// 2xx) both become `fail`.
async fn send(
    req_builder: reqwest::RequestBuilder,
    fail: fn(String) -> ApiError,
) -> Result<reqwest::Response, ApiError> {
    let resp = req_builder.send().await.map_err(|e| {
        if e.is_connect() {
            fail(format!("Connection failed: {}", e))
        } else {
            fail(format!("Request failed: {}", e))
        }
    })?;

    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(fail(format!("HTTP {}", status)))
    }
}

async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    fail: fn(String) -> ApiError,
) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| fail(format!("Error reading body: {}", e)))
}

/// Create an HTTP client with default configuration. No timeout is set.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!("{}/{}", APP_NAME.replace(' ', "-"), APP_VERSION))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
