//! Client constants
//!
//! Centralized location for endpoint paths, header names, environment
//! variable names and configuration defaults.

use std::time::Duration;

// Base URLs
pub const PRODUCTION_BASE_URL: &str = "https://api.eka.care";
pub const DEVELOPMENT_BASE_URL: &str = "https://api-dev.eka.care";

// Configuration defaults
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(100);
pub const DEFAULT_MAX_BACKOFF_DELAY: Duration = Duration::from_secs(20);
pub const DEFAULT_USER_AGENT: &str = "eka-sdk-rust/0.1";

/// Lead time before expiry at which an access token stops being usable.
pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 5 * 60;

// Environment variables
pub const ENV_ENVIRONMENT: &str = "EKA_ENVIRONMENT";
pub const ENV_BASE_URL: &str = "EKA_BASE_URL";
pub const ENV_CLIENT_ID: &str = "EKA_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "EKA_CLIENT_SECRET";
pub const ENV_AUTH_TOKEN: &str = "EKA_AUTH_TOKEN";
pub const ENV_API_KEY: &str = "EKA_API_KEY";
pub const ENV_TIMEOUT: &str = "EKA_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "EKA_MAX_RETRIES";
pub const ENV_USER_AGENT: &str = "EKA_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "EKA_LOG_LEVEL";

// Correlation headers
pub const HEADER_USER_ID: &str = "X-User-Id";
pub const HEADER_PARTNER_ID: &str = "X-Partner-Id";
pub const HEADER_FACILITY_ID: &str = "X-Hip-Id";
pub const HEADER_PATIENT_ID: &str = "X-Pt-Id";

/// Endpoint path table.
pub mod paths {
    // Token exchange
    pub const AUTH_LOGIN: &str = "/connect-auth/v1/account/login";
    pub const AUTH_REFRESH: &str = "/connect-auth/v1/account/refresh";

    pub const HEALTH: &str = "/health";

    // Registration via Aadhaar
    pub const AADHAAR_INIT: &str = "/abdm/na/v1/registration/aadhaar/init";
    pub const AADHAAR_VERIFY: &str = "/abdm/na/v1/registration/aadhaar/verify";
    pub const AADHAAR_RESEND: &str = "/abdm/na/v1/registration/aadhaar/resend";
    pub const AADHAAR_MOBILE_VERIFY: &str = "/abdm/na/v1/registration/aadhaar/mobile/verify";
    pub const AADHAAR_MOBILE_RESEND: &str = "/abdm/na/v1/registration/aadhaar/mobile/resend";
    pub const AADHAAR_CREATE: &str = "/abdm/na/v1/registration/aadhaar/create-phr";

    // Registration via mobile
    pub const MOBILE_INIT: &str = "/abdm/na/v1/registration/mobile/init";
    pub const MOBILE_VERIFY: &str = "/abdm/na/v1/registration/mobile/verify";
    pub const MOBILE_RESEND: &str = "/abdm/na/v1/registration/mobile/resend";
    pub const MOBILE_CREATE: &str = "/abdm/na/v1/registration/mobile/create-phr";

    // Registration helpers
    pub const ABHA_ADDRESS_CHECK: &str = "/abdm/na/v1/registration/phr/check";
    pub const ABHA_ADDRESS_SUGGEST: &str = "/abdm/na/v1/registration/suggest";
    /// Followed by `/{pincode}`.
    pub const PINCODE_PREFIX: &str = "/abdm/v1/registration/pincode";

    // Login
    pub const LOGIN_INIT: &str = "/abdm/na/v1/profile/login/init";
    pub const LOGIN_VERIFY: &str = "/abdm/na/v1/profile/login/verify";
    pub const LOGIN_PHR: &str = "/abdm/na/v1/profile/login/phr";

    // Profile
    pub const PROFILE: &str = "/abdm/v1/profile";
    pub const PROFILE_ASSET_CARD: &str = "/abdm/v1/profile/asset/card";
    pub const PROFILE_ASSET_QR: &str = "/abdm/v1/profile/asset/qr";
    pub const KYC_INIT: &str = "/abdm/v1/profile/kyc/init";
    pub const KYC_RESEND: &str = "/abdm/v1/profile/kyc/resend";
    pub const KYC_VERIFY: &str = "/abdm/v1/profile/kyc/verify";
    pub const SESSION_INIT: &str = "/abdm/v1/session/init";
    pub const SESSION_VERIFY: &str = "/abdm/v1/session/verify";
}
