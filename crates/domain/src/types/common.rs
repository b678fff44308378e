//! Shapes shared by several ABHA flows

use std::fmt;

use serde::{Deserialize, Serialize};

/// Next screen the user should see in an ABHA flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkipState {
    /// Flow finished, nothing left to do.
    AbhaEnd,
    /// The mobile number entered is not linked to the Aadhaar; verify it.
    ConfirmMobileOtp,
    /// Several ABHA addresses exist; let the user pick one.
    AbhaSelect,
    /// No ABHA address yet; go to address creation.
    AbhaCreate,
    /// A state this client does not know about, passed through verbatim.
    Other(String),
}

impl SkipState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::AbhaEnd => "abha_end",
            Self::ConfirmMobileOtp => "confirm_mobile_otp",
            Self::AbhaSelect => "abha_select",
            Self::AbhaCreate => "abha_create",
            Self::Other(value) => value,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::AbhaEnd)
    }

    pub fn requires_user_action(&self) -> bool {
        !self.is_complete()
    }
}

impl From<String> for SkipState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "abha_end" => Self::AbhaEnd,
            "confirm_mobile_otp" => Self::ConfirmMobileOtp,
            "abha_select" => Self::AbhaSelect,
            "abha_create" => Self::AbhaCreate,
            _ => Self::Other(value),
        }
    }
}

impl From<SkipState> for String {
    fn from(state: SkipState) -> Self {
        match state {
            SkipState::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SkipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eka platform identifiers returned once a user is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EkaIds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub min_token: String,
}

/// Response carrying the transaction id of a multi-step flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnResponse {
    pub txn_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Request naming only the flow's transaction (OTP resend calls).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnRequest {
    pub txn_id: String,
}

impl TxnRequest {
    pub fn new(txn_id: impl Into<String>) -> Self {
        Self { txn_id: txn_id.into() }
    }
}

/// OTP submission bound to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub txn_id: String,
    pub otp: String,
}

impl OtpVerifyRequest {
    pub fn new(txn_id: impl Into<String>, otp: impl Into<String>) -> Self {
        Self { txn_id: txn_id.into(), otp: otp.into() }
    }
}

/// ABHA profile as returned by registration, login and profile endpoints.
///
/// Each endpoint fills a different subset, so everything beyond the address
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbhaProfile {
    #[serde(default)]
    pub abha_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abha_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_birth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_birth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_verified: Option<bool>,
}

/// One selectable ABHA address offered after OTP verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbhaProfileSummary {
    pub abha_address: String,
    #[serde(default)]
    pub name: String,
    /// Sent by the API as a string flag.
    #[serde(default)]
    pub kyc_verified: String,
}

/// Raw bytes from a binary endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAsset {
    pub data: Vec<u8>,
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_state_round_trips_known_and_unknown_values() {
        let known: SkipState = serde_json::from_str("\"abha_select\"").unwrap();
        assert_eq!(known, SkipState::AbhaSelect);
        assert!(known.requires_user_action());

        let unknown: SkipState = serde_json::from_str("\"link_abha\"").unwrap();
        assert_eq!(unknown, SkipState::Other("link_abha".into()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"link_abha\"");

        assert!(SkipState::AbhaEnd.is_complete());
        assert!(!SkipState::AbhaEnd.requires_user_action());
    }

    #[test]
    fn profile_tolerates_partial_payloads() {
        let profile: AbhaProfile =
            serde_json::from_str(r#"{"abha_address":"jane@abdm","kyc_verified":true}"#).unwrap();

        assert_eq!(profile.abha_address, "jane@abdm");
        assert_eq!(profile.kyc_verified, Some(true));
        assert!(profile.gender.is_empty());
    }
}
