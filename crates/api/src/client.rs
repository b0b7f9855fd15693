use std::env;

use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Where to reach the backend. The base URL is the only externally
/// configurable surface of this crate.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub const ENV_BASE_URL: &'static str = "STUDY_API_BASE_URL";
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from the environment, falling back to localhost.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var(Self::ENV_BASE_URL).unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

/// Thin JSON HTTP client with uniform error semantics.
///
/// Successful bodies are parsed as the caller's declared type with no
/// further shape validation; a malformed server payload surfaces as
/// [`ApiError::Decode`], not as a failure of this component.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` and parse the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, None::<&()>).await
    }

    /// POST a JSON body to `endpoint` and parse the response as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    /// PUT a JSON body to `endpoint` and parse the response as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, Some(body)).await
    }

    /// DELETE `endpoint`. Use `T = ()` for endpoints answering 204.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, endpoint, None::<&()>).await
    }

    /// POST a multipart form to `endpoint` and parse the response as `T`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, self.url(endpoint));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            return Err(ApiError::from_error_body(status, body));
        }

        // 204 carries no body; `()` deserializes from JSON null.
        if status == StatusCode::NO_CONTENT {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
