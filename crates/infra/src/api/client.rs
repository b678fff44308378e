//! Authenticated API client shared by the service facades
//!
//! Fetches a bearer token from the credential provider for every
//! authenticated request and hands the call to the transport. Failures are
//! wrapped with the name of the operation that produced them.

use std::sync::Arc;

use eka_core::CredentialsProvider;
use eka_domain::{BinaryAsset, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::http::{ApiRequest, HttpTransport};

/// API client over a transport and a credential provider
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<HttpTransport>,
    credentials: Arc<dyn CredentialsProvider>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport with the caller-facing interceptor chain
    /// * `credentials` - Source of bearer tokens
    pub fn new(transport: Arc<HttpTransport>, credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self { transport, credentials }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Execute a request and decode its JSON body
    ///
    /// # Arguments
    ///
    /// * `operation` - Operation name recorded on errors
    /// * `request` - Request to execute
    ///
    /// # Returns
    ///
    /// Deserialized response
    ///
    /// # Errors
    ///
    /// Returns the credential, transport, API or decode error, wrapped in
    /// `EkaError::Operation`
    #[instrument(skip(self, request), fields(operation = operation, path = %request.path()))]
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: ApiRequest,
    ) -> Result<T> {
        let result = async {
            let bearer = self.bearer(&request, operation).await?;
            self.transport.execute_json(request, bearer.as_deref()).await
        }
        .await;

        if result.is_ok() {
            debug!("Request successful");
        }
        result.map_err(|err| err.context(operation))
    }

    /// Execute a request whose response body is ignored (204 or a status
    /// payload)
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send_json`]
    pub async fn send_empty(&self, operation: &'static str, request: ApiRequest) -> Result<()> {
        self.send_json::<Value>(operation, request).await.map(|_| ())
    }

    /// Execute a request and return the raw body
    ///
    /// # Arguments
    ///
    /// * `operation` - Operation name recorded on errors
    /// * `request` - Request to execute
    /// * `default_content_type` - Used when the response does not declare one
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send_json`], without decode errors
    #[instrument(skip(self, request, default_content_type), fields(operation = operation, path = %request.path()))]
    pub async fn send_bytes(
        &self,
        operation: &'static str,
        request: ApiRequest,
        default_content_type: &str,
    ) -> Result<BinaryAsset> {
        let result = async {
            let bearer = self.bearer(&request, operation).await?;
            self.transport.execute_bytes(request, bearer.as_deref(), default_content_type).await
        }
        .await;

        result.map_err(|err| err.context(operation))
    }

    async fn bearer(&self, request: &ApiRequest, operation: &str) -> Result<Option<String>> {
        if !request.is_authenticated() {
            return Ok(None);
        }
        let credentials = self.credentials.retrieve(operation).await?;
        Ok(Some(credentials.access_token))
    }
}
