//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with a JSON body
    async fn post_json(&self, url: &str, body: &serde_json::Value)
        -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::BotError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {} {:?}", url, query);
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| crate::BotError::Http(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::BotError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> crate::Result<HttpResponse> {
        // The Telegram URL embeds the bot token, so it stays out of the logs
        tracing::debug!("POST json ({} bytes)", body.to_string().len());
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| crate::BotError::Http(format!("POST failed: {}", e.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| crate::BotError::Http(format!("Reading response body: {}", e)))?;

        tracing::debug!("POST -> {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}
