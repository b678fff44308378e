//! Domain types and wire payloads
//!
//! Request/response shapes mirror the remote API's JSON field names.

pub mod auth;
pub mod common;
pub mod headers;
pub mod login;
pub mod profile;
pub mod registration;

pub use auth::{CredentialOrigin, Credentials, LoginRequest, RefreshRequest, TokenResponse};
pub use common::{
    AbhaProfile, AbhaProfileSummary, BinaryAsset, EkaIds, OtpVerifyRequest, SkipState, TxnRequest,
    TxnResponse,
};
pub use headers::RequestHeaders;
pub use login::{
    LoginInitRequest, LoginMethod, LoginVerifyResponse, PhrAddressLoginRequest,
    PhrAddressLoginResponse,
};
pub use profile::{
    AssetQr, KycInitRequest, KycVerifyRequest, SessionInitRequest, SessionTokens,
    UpdateProfileRequest,
};
pub use registration::{
    AadhaarInitRequest, AadhaarVerifyRequest, AbhaAddressCheckRequest, AbhaAddressCheckResponse,
    CreateAbhaRequest, MobileCreateAbhaRequest, MobileInitRequest, MobileVerifyResponse,
    PincodeDetails, ProfileDetailsRequest, RegistrationResponse, SuggestAddressQuery,
    SuggestionsResponse,
};
