use crate::shared::error::QueryError;
use crate::shared::Result;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connection settings shared by both services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Sent as a bearer token when present
    pub access_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Authenticated HTTP handle to one REST service
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RestSession {
    client: reqwest::Client,
    service: &'static str,
    base_url: String,
}

impl RestSession {
    /// Creates a session without contacting the service
    ///
    /// # Arguments
    /// * `service` - Service name used in errors and logs
    /// * `base_url` - Service root, e.g. `https://registry.example.com`
    /// * `settings` - Token and timeout
    pub fn new(service: &'static str, base_url: &str, settings: &SessionSettings) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| QueryError::ServiceUnavailable {
            service: service.to_string(),
            url: base_url.clone(),
            details: format!("invalid URL: {}", e),
        })?;

        let mut headers = HeaderMap::new();
        if let Some(token) = &settings.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Access token contains characters that cannot be sent in a header")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(format!("prodsec-query/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            service,
            base_url,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the service answers and accepts the credentials
    ///
    /// # Errors
    /// Returns [`QueryError::ServiceUnavailable`] on transport errors and on
    /// any non-success status (401 and 403 included)
    pub async fn probe(&self, health_path: &str) -> Result<()> {
        let url = self.url(health_path, &[])?;
        log::debug!("Probing {} at {}", self.service, url);

        let unavailable = |details: String| QueryError::ServiceUnavailable {
            service: self.service.to_string(),
            url: self.base_url.clone(),
            details,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("health check returned {}", response.status())).into());
        }
        log::info!("Connected to {} at {}", self.service, self.base_url);
        Ok(())
    }

    /// Builds a request URL below the base URL
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let url = if query.is_empty() {
            Url::parse(&raw)?
        } else {
            Url::parse_with_params(&raw, query)?
        };
        Ok(url)
    }

    /// GETs `path` and decodes the JSON body
    ///
    /// # Errors
    /// Returns an error on transport failures, non-success statuses and
    /// undecodable bodies
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        match self.get_optional_json(path, query).await? {
            Some(value) => Ok(value),
            None => anyhow::bail!("{} returned 404 Not Found for {}", self.service, path),
        }
    }

    /// Like [`RestSession::get_json`], but a 404 yields `None`
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Option<T>> {
        let url = self.url(path, query)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            anyhow::bail!("{} returned {} for {}", self.service, status, url);
        }

        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("Unexpected response from {}", url))?;
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> RestSession {
        RestSession::new(
            "component-registry",
            "https://registry.example.com/",
            &SessionSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_is_trimmed() {
        assert_eq!(session().base_url(), "https://registry.example.com");
    }

    #[test]
    fn test_url_encodes_query() {
        let url = session()
            .url(
                "/api/v1/components",
                &[
                    ("name".to_string(), "curl".to_string()),
                    ("ofuri".to_string(), "o:redhat:rhel:9.2.0.z".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://registry.example.com/api/v1/components?name=curl&ofuri=o%3Aredhat%3Arhel%3A9.2.0.z"
        );
    }

    #[test]
    fn test_invalid_base_url_is_unavailable() {
        let err = RestSession::new("incident-database", "not a url", &SessionSettings::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QueryError>(),
            Some(QueryError::ServiceUnavailable { .. })
        ));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let settings = SessionSettings {
            access_token: Some("abc\ndef".to_string()),
            ..SessionSettings::default()
        };
        assert!(RestSession::new("component-registry", "https://registry.example.com", &settings).is_err());
    }

    #[tokio::test]
    async fn test_probe_unreachable_service() {
        let settings = SessionSettings {
            access_token: None,
            timeout: Duration::from_secs(2),
        };
        // port 9 (discard) on localhost is closed in test environments
        let session = RestSession::new("component-registry", "http://127.0.0.1:9", &settings).unwrap();

        let err = session.probe("/api/healthy").await.unwrap_err();
        match err.downcast_ref::<QueryError>() {
            Some(QueryError::ServiceUnavailable { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:9")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
