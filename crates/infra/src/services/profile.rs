//! Profile, asset, KYC and session endpoints
//!
//! Calls that act on a specific user take the Eka `oid` and send it as a
//! query parameter.

use std::sync::Arc;

use eka_domain::constants::paths;
use eka_domain::{
    AbhaProfile, AssetQr, BinaryAsset, KycInitRequest, KycVerifyRequest, OtpVerifyRequest,
    RequestHeaders, Result, SessionInitRequest, SessionTokens, TxnRequest, TxnResponse,
    UpdateProfileRequest,
};
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::http::ApiRequest;

/// Content type assumed for the ABHA card when the server omits one
const CARD_CONTENT_TYPE: &str = "image/png";

/// Profile endpoints
#[derive(Clone)]
pub struct ProfileService {
    client: Arc<ApiClient>,
}

impl ProfileService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the ABHA profile for the user named by the correlation headers
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn get(&self, headers: &RequestHeaders) -> Result<AbhaProfile> {
        let call = ApiRequest::get(paths::PROFILE).headers(headers);
        self.client.send_json("get_profile", call).await
    }

    /// Update profile fields; fields left as `None` are not sent
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers, request))]
    pub async fn update(
        &self,
        headers: &RequestHeaders,
        oid: &str,
        request: &UpdateProfileRequest,
    ) -> Result<()> {
        let call = ApiRequest::patch(paths::PROFILE)
            .query("oid", oid)
            .json_for("update_profile", request)?
            .headers(headers);
        self.client.send_empty("update_profile", call).await?;

        debug!("Profile updated");
        Ok(())
    }

    /// Delete the ABHA profile linked to `oid`
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers))]
    pub async fn delete(&self, headers: &RequestHeaders, oid: &str) -> Result<()> {
        let call = ApiRequest::delete(paths::PROFILE).query("oid", oid).headers(headers);
        self.client.send_empty("delete_profile", call).await
    }

    /// Download the ABHA card image
    ///
    /// # Returns
    ///
    /// Raw image bytes with the server's content type, `image/png` when the
    /// response does not declare one
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers))]
    pub async fn card(&self, headers: &RequestHeaders, oid: &str) -> Result<BinaryAsset> {
        let call = ApiRequest::get(paths::PROFILE_ASSET_CARD).query("oid", oid).headers(headers);
        let asset = self.client.send_bytes("get_card", call, CARD_CONTENT_TYPE).await?;

        debug!(bytes = asset.data.len(), content_type = %asset.content_type, "Card downloaded");
        Ok(asset)
    }

    /// Fetch the QR payload in JSON form
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers))]
    pub async fn qr(&self, headers: &RequestHeaders, oid: &str) -> Result<AssetQr> {
        let call = ApiRequest::get(paths::PROFILE_ASSET_QR)
            .query("oid", oid)
            .query("format", "json")
            .headers(headers);
        self.client.send_json("get_qr", call).await
    }

    // === KYC ===

    /// Start KYC for an existing profile
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers, request), fields(method = %request.method))]
    pub async fn kyc_init(
        &self,
        headers: &RequestHeaders,
        oid: &str,
        request: &KycInitRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::KYC_INIT)
            .query("oid", oid)
            .json_for("kyc_init", request)?
            .headers(headers);
        self.client.send_json("kyc_init", call).await
    }

    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers, request))]
    pub async fn kyc_resend(
        &self,
        headers: &RequestHeaders,
        oid: &str,
        request: &TxnRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::KYC_RESEND)
            .query("oid", oid)
            .json_for("kyc_resend", request)?
            .headers(headers);
        self.client.send_json("kyc_resend", call).await
    }

    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers, request))]
    pub async fn kyc_verify(
        &self,
        headers: &RequestHeaders,
        oid: &str,
        request: &KycVerifyRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::KYC_VERIFY)
            .query("oid", oid)
            .json_for("kyc_verify", request)?
            .headers(headers);
        self.client.send_json("kyc_verify", call).await
    }

    // === Session ===

    /// Start a user session for an ABHA address
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all, fields(abha_address = %request.abha_address))]
    pub async fn session_init(
        &self,
        headers: &RequestHeaders,
        request: &SessionInitRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::SESSION_INIT)
            .json_for("session_init", request)?
            .headers(headers);
        self.client.send_json("session_init", call).await
    }

    /// Verify the session OTP and receive the user tokens
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn session_verify(
        &self,
        headers: &RequestHeaders,
        request: &OtpVerifyRequest,
    ) -> Result<SessionTokens> {
        let call = ApiRequest::post(paths::SESSION_VERIFY)
            .json_for("session_verify", request)?
            .headers(headers);
        self.client.send_json("session_verify", call).await
    }
}
