use std::sync::Arc;
use std::time::Duration;

use eka_domain::{ApiErrorDetails, BinaryAsset, ClientConfig, EkaError, Result};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use super::interceptor::{HttpRequest, HttpResponse, HttpSender, Interceptor, Next};
use super::request::ApiRequest;
use crate::errors::into_domain;

const JSON: &str = "application/json";

/// Executes [`ApiRequest`]s against the configured base URL.
///
/// Every call goes through the interceptor chain and ends at the
/// [`HttpSender`]. Statuses of 400 and above become `EkaError::Api`; network
/// failures stay `EkaError::Transport`.
pub struct HttpTransport {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    request_timeout: Duration,
    interceptors: Vec<Arc<dyn Interceptor>>,
    sender: Arc<dyn HttpSender>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, sender: Arc<dyn HttpSender>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            request_timeout: config.request_timeout,
            interceptors: Vec::new(),
            sender,
        }
    }

    /// Append an interceptor. Earlier registrations wrap later ones.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn with_interceptors(
        mut self,
        interceptors: impl IntoIterator<Item = Arc<dyn Interceptor>>,
    ) -> Self {
        self.interceptors.extend(interceptors);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn interceptors(&self) -> &[Arc<dyn Interceptor>] {
        &self.interceptors
    }

    /// Run one exchange and classify the status.
    ///
    /// # Arguments
    ///
    /// * `request` - Declarative request
    /// * `bearer` - Token for the `Authorization` header, if any
    ///
    /// # Errors
    ///
    /// - `EkaError::Api` for a status of 400 or above, with the parsed
    ///   error envelope when the body is one
    /// - `EkaError::Transport` when no response was received
    #[instrument(skip(self, request, bearer), fields(method = %request.method(), path = %request.path()))]
    pub async fn execute(&self, request: ApiRequest, bearer: Option<&str>) -> Result<HttpResponse> {
        let http_request = self.prepare(request, bearer)?;
        let response =
            Next::new(&self.interceptors, self.sender.as_ref()).run(http_request).await?;

        if !response.is_success() {
            let details = ApiErrorDetails::from_response(response.status, &response.body);
            debug!(status = response.status, code = ?details.code, "API returned an error");
            return Err(EkaError::api(details));
        }
        Ok(response)
    }

    /// Execute and decode the JSON body. An empty body decodes as `null`.
    ///
    /// # Errors
    ///
    /// As [`HttpTransport::execute`], plus `EkaError::Decode` when the body
    /// does not match `T`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        bearer: Option<&str>,
    ) -> Result<T> {
        let response = self.execute(request, bearer).await?;
        decode_json(&response.body)
    }

    /// Execute and pass the body through untouched.
    ///
    /// `default_content_type` is used when the response does not declare one.
    ///
    /// # Errors
    ///
    /// As [`HttpTransport::execute`].
    pub async fn execute_bytes(
        &self,
        request: ApiRequest,
        bearer: Option<&str>,
        default_content_type: &str,
    ) -> Result<BinaryAsset> {
        let response = self.execute(request, bearer).await?;
        let content_type = response.content_type().unwrap_or(default_content_type).to_string();
        Ok(BinaryAsset { data: response.body, content_type })
    }

    fn prepare(&self, request: ApiRequest, bearer: Option<&str>) -> Result<HttpRequest> {
        let url = request.url(&self.base_url)?;
        let method = request.method().clone();
        let authenticated = request.is_authenticated();
        // Reqwest replaces the client-wide timeout with the per-request one,
        // so the overall bound has to be folded in here.
        let timeout =
            Some(request.request_timeout().unwrap_or(self.request_timeout).min(self.timeout));

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.insert(USER_AGENT, header_value("User-Agent", &self.user_agent)?);
        if request.body().is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }
        for (name, value) in request.correlation_headers().iter() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| EkaError::validation(name, format!("invalid header name: {err}")))?;
            let value = header_value(name.as_str(), value)?;
            headers.insert(name, value);
        }
        if let Some(token) = bearer {
            let mut value = header_value("Authorization", &format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(HttpRequest { method, url, headers, body: request.into_body(), timeout, authenticated })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|err| EkaError::validation(name, format!("invalid header value: {err}")))
}

/// Decode a JSON body, treating an empty body as `null`.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(into_domain);
    }
    serde_json::from_slice(body).map_err(into_domain)
}
