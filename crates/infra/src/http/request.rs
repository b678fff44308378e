//! Declarative description of one API call

use std::time::Duration;

use eka_domain::{EkaError, RequestHeaders, Result};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::errors::into_domain;

/// Method, path, query, correlation headers and optional JSON body.
///
/// Requests are authenticated unless [`ApiRequest::unauthenticated`] is
/// called; the transport attaches the bearer token it is given.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: RequestHeaders,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
    authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: RequestHeaders::new(),
            body: None,
            timeout: None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns `EkaError::Decode` if the value cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body).map_err(into_domain)?);
        Ok(self)
    }

    /// [`ApiRequest::json`] with `operation` recorded on an encoding error.
    ///
    /// # Errors
    /// Returns `EkaError::Operation` wrapping the `Decode` error.
    pub fn json_for<T: Serialize + ?Sized>(
        self,
        operation: &'static str,
        body: &T,
    ) -> Result<Self> {
        self.json(body).map_err(|err| err.context(operation))
    }

    /// Append a query parameter. Empty values are omitted.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.query.push((key.into(), value));
        }
        self
    }

    /// Merge caller correlation headers; later values win.
    pub fn headers(mut self, headers: &RequestHeaders) -> Self {
        for (name, value) in headers.iter() {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send without a bearer token (token exchange, health check).
    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn correlation_headers(&self) -> &RequestHeaders {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub(crate) fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }

    /// `base_url + path`, followed by the encoded query string.
    ///
    /// # Errors
    /// Returns `EkaError::Config` when the result is not a valid URL.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let mut url = Url::parse(&raw)
            .map_err(|err| EkaError::Config(format!("invalid request URL {raw:?}: {err}")))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}
