//! ABHA login flows

use std::sync::Arc;

use eka_domain::constants::paths;
use eka_domain::{
    LoginInitRequest, LoginVerifyResponse, OtpVerifyRequest, PhrAddressLoginRequest,
    PhrAddressLoginResponse, RequestHeaders, Result, TxnResponse,
};
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::http::ApiRequest;

/// Login endpoints for an existing ABHA holder
#[derive(Clone)]
pub struct LoginService {
    client: Arc<ApiClient>,
}

impl LoginService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Start a login by sending an OTP for the given identifier
    ///
    /// # Arguments
    ///
    /// * `headers` - Correlation headers forwarded unchanged
    /// * `request` - Identifier and the kind of identifier it is
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn init(
        &self,
        headers: &RequestHeaders,
        request: &LoginInitRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::LOGIN_INIT)
            .json_for("login_init", request)?
            .headers(headers);
        self.client.send_json("login_init", call).await
    }

    /// Verify the login OTP
    ///
    /// When several ABHA addresses share the identifier the response lists
    /// them and `skip_state` asks the caller to pick one with
    /// [`LoginService::phr_address`].
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn verify(
        &self,
        headers: &RequestHeaders,
        request: &OtpVerifyRequest,
    ) -> Result<LoginVerifyResponse> {
        let call = ApiRequest::post(paths::LOGIN_VERIFY)
            .json_for("login_verify", request)?
            .headers(headers);
        let response: LoginVerifyResponse = self.client.send_json("login_verify", call).await?;

        debug!(skip_state = %response.skip_state, profiles = response.abha_profiles.len(), "Login verified");
        Ok(response)
    }

    /// Complete a login with the chosen ABHA address
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all, fields(phr_address = %request.phr_address))]
    pub async fn phr_address(
        &self,
        headers: &RequestHeaders,
        request: &PhrAddressLoginRequest,
    ) -> Result<PhrAddressLoginResponse> {
        let call = ApiRequest::post(paths::LOGIN_PHR)
            .json_for("login_phr_address", request)?
            .headers(headers);
        self.client.send_json("login_phr_address", call).await
    }
}
