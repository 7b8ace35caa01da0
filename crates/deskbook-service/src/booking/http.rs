//! Booking submission over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use deskbook_core::config::DirectoryConfig;
use deskbook_core::error::AppError;
use deskbook_core::result::AppResult;
use deskbook_core::types::EntryId;
use deskbook_entity::EntryStatus;

use super::{BookingReceipt, BookingRequest, BookingSubmitter};

/// Posts bookings to `{base_url}{bookings_path}`.
#[derive(Debug, Clone)]
pub struct HttpBookingSubmitter {
    client: Client,
    bookings_url: String,
    api_token: Option<String>,
}

impl HttpBookingSubmitter {
    /// Create a submitter from the `[directory]` config section.
    pub fn new(config: &DirectoryConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            bookings_url: config.bookings_url(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl BookingSubmitter for HttpBookingSubmitter {
    #[instrument(skip(self, request), fields(url = %self.bookings_url, desk = %request.location_id))]
    async fn submit(&self, request: &BookingRequest) -> AppResult<BookingReceipt> {
        let mut builder = self.client.post(&self.bookings_url).json(request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::CONFLICT {
                return Err(AppError::conflict(format!(
                    "Desk API rejected the booking as conflicting: {body}"
                )));
            }
            return Err(AppError::external_service(format!(
                "Desk API returned {status}: {body}"
            )));
        }

        let body = response.text().await?;
        Ok(parse_receipt(&body))
    }
}

/// Read `id` and `status` from a response body, tolerating anything.
fn parse_receipt(body: &str) -> BookingReceipt {
    let value: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let id = match value.get("id") {
        Some(Value::String(s)) => Some(EntryId::new(s.clone())),
        Some(Value::Number(n)) => Some(EntryId::new(n.to_string())),
        _ => None,
    };
    let status = value
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<EntryStatus>().ok())
        .unwrap_or(EntryStatus::Pending);

    BookingReceipt { id, status }
}
