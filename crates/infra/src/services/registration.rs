//! ABHA registration via Aadhaar or mobile number
//!
//! Each method is one POST or GET against the registration endpoints. The
//! init, verify and create steps of a flow are chained by the caller using
//! the returned transaction id.

use std::sync::Arc;

use eka_domain::constants::paths;
use eka_domain::{
    AadhaarInitRequest, AadhaarVerifyRequest, AbhaAddressCheckRequest, AbhaAddressCheckResponse,
    CreateAbhaRequest, MobileCreateAbhaRequest, MobileInitRequest, MobileVerifyResponse,
    OtpVerifyRequest, PincodeDetails, RegistrationResponse, RequestHeaders, Result,
    SuggestAddressQuery, SuggestionsResponse, TxnRequest, TxnResponse,
};
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::api::ApiClient;
use crate::http::ApiRequest;

/// Registration endpoints
#[derive(Clone)]
pub struct RegistrationService {
    client: Arc<ApiClient>,
}

impl RegistrationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    // === Aadhaar flow ===

    /// Send an OTP to the mobile number linked with an Aadhaar number
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn aadhaar_init(
        &self,
        headers: &RequestHeaders,
        request: &AadhaarInitRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::AADHAAR_INIT)
            .json_for("aadhaar_init", request)?
            .headers(headers);
        let response: TxnResponse = self.client.send_json("aadhaar_init", call).await?;

        debug!(txn_id = %response.txn_id, "Aadhaar OTP sent");
        Ok(response)
    }

    /// Verify the Aadhaar OTP
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn aadhaar_verify(
        &self,
        headers: &RequestHeaders,
        request: &AadhaarVerifyRequest,
    ) -> Result<RegistrationResponse> {
        let call = ApiRequest::post(paths::AADHAAR_VERIFY)
            .json_for("aadhaar_verify", request)?
            .headers(headers);
        self.client.send_json("aadhaar_verify", call).await
    }

    /// Resend the Aadhaar OTP
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn aadhaar_resend(
        &self,
        headers: &RequestHeaders,
        request: &TxnRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::AADHAAR_RESEND)
            .json_for("aadhaar_resend", request)?
            .headers(headers);
        self.client.send_json("aadhaar_resend", call).await
    }

    /// Verify the OTP sent to a mobile number that is not the one linked with
    /// the Aadhaar (`skip_state == confirm_mobile_otp`)
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers, request))]
    pub async fn aadhaar_mobile_verify(
        &self,
        headers: &RequestHeaders,
        oid: &str,
        request: &OtpVerifyRequest,
    ) -> Result<RegistrationResponse> {
        let call = ApiRequest::post(paths::AADHAAR_MOBILE_VERIFY)
            .query("oid", oid)
            .json_for("aadhaar_mobile_verify", request)?
            .headers(headers);
        self.client.send_json("aadhaar_mobile_verify", call).await
    }

    /// Resend the OTP for [`RegistrationService::aadhaar_mobile_verify`]
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers, request))]
    pub async fn aadhaar_mobile_resend(
        &self,
        headers: &RequestHeaders,
        oid: &str,
        request: &TxnRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::AADHAAR_MOBILE_RESEND)
            .query("oid", oid)
            .json_for("aadhaar_mobile_resend", request)?
            .headers(headers);
        self.client.send_json("aadhaar_mobile_resend", call).await
    }

    /// Create the ABHA address at the end of the Aadhaar flow
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all, fields(abha_address = %request.abha_address))]
    pub async fn aadhaar_create_abha(
        &self,
        headers: &RequestHeaders,
        request: &CreateAbhaRequest,
    ) -> Result<RegistrationResponse> {
        let call = ApiRequest::post(paths::AADHAAR_CREATE)
            .json_for("aadhaar_create_abha", request)?
            .headers(headers);
        self.client.send_json("aadhaar_create_abha", call).await
    }

    // === Mobile flow ===

    /// Send an OTP to a mobile number
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn mobile_init(
        &self,
        headers: &RequestHeaders,
        request: &MobileInitRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::MOBILE_INIT)
            .json_for("mobile_init", request)?
            .headers(headers);
        self.client.send_json("mobile_init", call).await
    }

    /// Verify the mobile OTP; lists ABHA profiles already on that number
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn mobile_verify(
        &self,
        headers: &RequestHeaders,
        request: &OtpVerifyRequest,
    ) -> Result<MobileVerifyResponse> {
        let call = ApiRequest::post(paths::MOBILE_VERIFY)
            .json_for("mobile_verify", request)?
            .headers(headers);
        let response: MobileVerifyResponse = self.client.send_json("mobile_verify", call).await?;

        debug!(profiles = response.abha_profiles.len(), skip_state = %response.skip_state, "Mobile verified");
        Ok(response)
    }

    /// Resend the mobile OTP
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn mobile_resend(
        &self,
        headers: &RequestHeaders,
        request: &TxnRequest,
    ) -> Result<TxnResponse> {
        let call = ApiRequest::post(paths::MOBILE_RESEND)
            .json_for("mobile_resend", request)?
            .headers(headers);
        self.client.send_json("mobile_resend", call).await
    }

    /// Create the ABHA address with demographic details at the end of the
    /// mobile flow
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all, fields(abha_address = %request.abha_address))]
    pub async fn mobile_create_abha(
        &self,
        headers: &RequestHeaders,
        request: &MobileCreateAbhaRequest,
    ) -> Result<RegistrationResponse> {
        let call = ApiRequest::post(paths::MOBILE_CREATE)
            .json_for("mobile_create_abha", request)?
            .headers(headers);
        self.client.send_json("mobile_create_abha", call).await
    }

    // === Helpers ===

    /// Check whether an ABHA address is already taken
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all, fields(abha_address = %request.abha_address))]
    pub async fn check_abha_address(
        &self,
        headers: &RequestHeaders,
        request: &AbhaAddressCheckRequest,
    ) -> Result<AbhaAddressCheckResponse> {
        let call = ApiRequest::post(paths::ABHA_ADDRESS_CHECK)
            .json_for("check_abha_address", request)?
            .headers(headers);
        self.client.send_json("check_abha_address", call).await
    }

    /// Suggest available ABHA addresses for a name and date of birth
    ///
    /// Optional name parts that are absent or empty are left out of the query.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip_all)]
    pub async fn suggest_abha_addresses(
        &self,
        headers: &RequestHeaders,
        query: &SuggestAddressQuery,
    ) -> Result<SuggestionsResponse> {
        let call = ApiRequest::get(paths::ABHA_ADDRESS_SUGGEST)
            .query("fn", query.first_name.as_str())
            .query("mn", query.middle_name.as_deref().unwrap_or_default())
            .query("ln", query.last_name.as_deref().unwrap_or_default())
            .query("dob", query.dob.as_str())
            .query("transactionId", query.transaction_id.as_str())
            .headers(headers);
        self.client.send_json("suggest_abha_addresses", call).await
    }

    /// District and state for a pincode
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    #[instrument(skip(self, headers))]
    pub async fn pincode_details(
        &self,
        headers: &RequestHeaders,
        pincode: &str,
    ) -> Result<PincodeDetails> {
        let path = format!("{}/{}", paths::PINCODE_PREFIX, encode(pincode));
        let call = ApiRequest::get(path).headers(headers);
        self.client.send_json("pincode_details", call).await
    }
}
