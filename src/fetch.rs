use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::USER_AGENT;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only text transport used by the resolver for each route attempt.
pub trait Fetcher: Send + Sync {
    fn get_text(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub http_client: Option<HttpClient>,
}

pub struct HttpFetcher {
    http: HttpClient,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.user_agent.trim().is_empty() {
            bail!("feed client user agent required");
        }

        let http = match config.http_client {
            Some(client) => client,
            None => HttpClient::builder()
                .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()
                .context("build feed HTTP client")?,
        };

        Ok(Self {
            http,
            user_agent: config.user_agent,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .with_context(|| format!("request {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{url} responded with status {status}");
        }

        response
            .text()
            .with_context(|| format!("read response body from {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_user_agent() {
        let err = HttpFetcher::new(ClientConfig {
            user_agent: "  ".into(),
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(err.to_string().contains("user agent"));
    }
}
