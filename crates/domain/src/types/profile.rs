//! Profile, KYC, asset and session payloads

use serde::{Deserialize, Serialize};

/// Partial profile update. Unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_of_birth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_birth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

/// Start KYC for an existing ABHA (e.g. method `abha-number`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycInitRequest {
    pub identifier: String,
    pub method: String,
    pub user_x_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycVerifyRequest {
    pub txn_id: String,
    pub otp: String,
    pub user_x_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInitRequest {
    pub abha_address: String,
}

/// ABHA user session minted by session verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Decoded ABHA QR payload. Some keys contain spaces on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetQr {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub abha_address: String,
    #[serde(rename = "dist name", default, skip_serializing_if = "String::is_empty")]
    pub dist_name: String,
    #[serde(rename = "distlgd", default, skip_serializing_if = "String::is_empty")]
    pub district_lgd: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub district_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dob: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gender: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hidn: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mobile: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phr: String,
    #[serde(rename = "state name", default, skip_serializing_if = "String::is_empty")]
    pub state_name: String,
    #[serde(rename = "statelgd", default, skip_serializing_if = "String::is_empty")]
    pub state_lgd: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_payload_with_spaced_keys_decodes() {
        let body = r#"{"hidn":"91-0000","dist name":"Bengaluru","state name":"Karnataka","statelgd":"29"}"#;
        let qr: AssetQr = serde_json::from_str(body).unwrap();

        assert_eq!(qr.dist_name, "Bengaluru");
        assert_eq!(qr.state_name, "Karnataka");
        assert_eq!(qr.state_lgd, "29");
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let json = serde_json::to_string(&UpdateProfileRequest::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
