// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Send a request and return the body, failing on any non-success status.
pub async fn fetch_text(request: RequestBuilder) -> Result<String> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

/// Fetch a page body with a plain GET.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    fetch_text(client.get(url)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_with_and_without_timeout() {
        assert!(create_client(&HttpConfig::default()).is_ok());

        let config = HttpConfig {
            timeout_secs: Some(5),
            ..HttpConfig::default()
        };
        assert!(create_client(&config).is_ok());
    }
}
