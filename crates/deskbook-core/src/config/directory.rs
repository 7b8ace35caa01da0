//! Remote desk API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where and how to reach the desk directory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the desk API, e.g. `https://desks.example.com/api`.
    pub base_url: String,
    /// Path of the desk listing endpoint.
    #[serde(default = "default_desks_path")]
    pub desks_path: String,
    /// Path of the booking submission endpoint.
    #[serde(default = "default_bookings_path")]
    pub bookings_path: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Interval between background directory refreshes.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

impl DirectoryConfig {
    /// Full URL of the desk listing endpoint.
    pub fn desks_url(&self) -> String {
        join_url(&self.base_url, &self.desks_path)
    }

    /// Full URL of the booking submission endpoint.
    pub fn bookings_url(&self) -> String {
        join_url(&self.base_url, &self.bookings_path)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }
}

/// Join a base URL and a path with exactly one slash between them.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn default_desks_path() -> String {
    "/desks".to_string()
}

fn default_bookings_path() -> String {
    "/bookings".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> DirectoryConfig {
        DirectoryConfig {
            base_url: base_url.to_string(),
            desks_path: default_desks_path(),
            bookings_path: default_bookings_path(),
            api_token: None,
            request_timeout_seconds: default_request_timeout(),
            poll_interval_seconds: default_poll_interval(),
        }
    }

    #[test]
    fn test_url_join() {
        assert_eq!(
            config("http://localhost:9000/api/").desks_url(),
            "http://localhost:9000/api/desks"
        );
        assert_eq!(
            config("http://localhost:9000").bookings_url(),
            "http://localhost:9000/bookings"
        );
    }
}
