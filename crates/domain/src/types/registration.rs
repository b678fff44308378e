//! ABHA registration payloads (Aadhaar and mobile flows)

use serde::{Deserialize, Serialize};

use super::common::{AbhaProfile, AbhaProfileSummary, EkaIds, SkipState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadhaarInitRequest {
    pub aadhaar_number: String,
}

impl AadhaarInitRequest {
    pub fn new(aadhaar_number: impl Into<String>) -> Self {
        Self { aadhaar_number: aadhaar_number.into() }
    }
}

/// Aadhaar OTP plus the mobile number to link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadhaarVerifyRequest {
    pub txn_id: String,
    pub otp: String,
    pub mobile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileInitRequest {
    pub mobile_number: String,
}

impl MobileInitRequest {
    pub fn new(mobile_number: impl Into<String>) -> Self {
        Self { mobile_number: mobile_number.into() }
    }
}

/// Create an ABHA address at the end of the Aadhaar flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAbhaRequest {
    pub txn_id: String,
    pub abha_address: String,
}

/// Demographics required when creating an address via the mobile flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetailsRequest {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub gender: String,
    pub year_of_birth: i32,
    pub month_of_birth: u32,
    pub day_of_birth: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileCreateAbhaRequest {
    pub txn_id: String,
    pub abha_address: String,
    pub profile: ProfileDetailsRequest,
}

/// Result of a registration step that may mint an ABHA session.
///
/// Used by Aadhaar verify, Aadhaar mobile verify and both create calls. The
/// mobile create call reports `success` and omits `txn_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default)]
    pub txn_id: String,
    pub skip_state: SkipState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AbhaProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eka: Option<EkaIds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Mobile OTP verification result listing addresses linked to the number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileVerifyResponse {
    pub txn_id: String,
    pub skip_state: SkipState,
    #[serde(default)]
    pub abha_profiles: Vec<AbhaProfileSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eka: Option<EkaIds>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbhaAddressCheckRequest {
    pub abha_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbhaAddressCheckResponse {
    pub exists: bool,
}

/// Inputs for address suggestions. Sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestAddressQuery {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    /// `YYYY-MM-DD`.
    pub dob: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PincodeDetails {
    pub pincode: String,
    #[serde(default)]
    pub dist_code: String,
    #[serde(default)]
    pub dist_name: String,
    #[serde(default)]
    pub state_code: String,
    #[serde(default)]
    pub state_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_create_response_without_txn_id_decodes() {
        let body = r#"{"skip_state":"abha_end","success":true,"token":"t","eka":{"min_token":"m"}}"#;
        let response: RegistrationResponse = serde_json::from_str(body).unwrap();

        assert!(response.txn_id.is_empty());
        assert_eq!(response.success, Some(true));
        assert!(response.skip_state.is_complete());
        assert_eq!(response.eka.unwrap().min_token, "m");
    }

    #[test]
    fn optional_profile_fields_are_omitted_on_the_wire() {
        let request = ProfileDetailsRequest {
            first_name: "Asha".into(),
            gender: "F".into(),
            year_of_birth: 1990,
            month_of_birth: 4,
            day_of_birth: 12,
            pincode: "560001".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("middle_name").is_none());
        assert_eq!(json["year_of_birth"], 1990);
    }
}
