use crate::error::FetchError;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub type Result<T> = std::result::Result<T, FetchError>;

/// Thin ClickUp v2 API client. Authorizes every request with the raw token.
#[derive(Debug, Clone)]
pub struct ClickUpClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ClickUpClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|source| FetchError::Http {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api/v2/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let request = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.token.as_str())
            .query(query);
        send_json(request, url).await
    }

    /// Unauthenticated form post, used by the OAuth code exchange.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.url(path);
        let request = self.http.post(&url).form(form);
        send_json(request, url).await
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder, url: String) -> Result<T> {
    debug!(target: "gamify::fetch", %url, "request");
    let response = request.send().await.map_err(|source| FetchError::Http {
        url: url.clone(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(target: "gamify::fetch", %url, status = status.as_u16(), "ClickUp returned non-success status");
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| FetchError::InvalidPayload {
            url,
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = ClickUpClient::new("http://localhost:9000/", "pk").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(
            client.url("/list/1/task"),
            "http://localhost:9000/api/v2/list/1/task"
        );
    }
}
