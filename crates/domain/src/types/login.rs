//! ABHA login payloads

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::{AbhaProfile, AbhaProfileSummary, EkaIds, SkipState};

/// Identifier type used to start an ABHA login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMethod {
    PhrAddress,
    AbhaNumber,
    Mobile,
    AadhaarNumber,
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PhrAddress => "phr_address",
            Self::AbhaNumber => "abha_number",
            Self::Mobile => "mobile",
            Self::AadhaarNumber => "aadhaar_number",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInitRequest {
    pub identifier: String,
    pub method: LoginMethod,
}

impl LoginInitRequest {
    pub fn new(identifier: impl Into<String>, method: LoginMethod) -> Self {
        Self { identifier: identifier.into(), method }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginVerifyResponse {
    pub txn_id: String,
    pub skip_state: SkipState,
    #[serde(default)]
    pub abha_profiles: Vec<AbhaProfileSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eka: Option<EkaIds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AbhaProfile>,
}

/// Pick one ABHA address after a multi-address OTP verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrAddressLoginRequest {
    pub phr_address: String,
    pub txn_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhrAddressLoginResponse {
    #[serde(default)]
    pub txn_id: String,
    pub skip_state: SkipState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eka: Option<EkaIds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<AbhaProfile>,
}
