//! Service facades over the Eka ABDM endpoints.
//!
//! Each facade maps one domain operation to one HTTP call with a fixed path
//! and method. Multi-step flows (init, verify, create) are driven by the
//! caller; facades never orchestrate, retry or cache.

pub mod login;
pub mod profile;
pub mod registration;
pub mod utility;

pub use login::LoginService;
pub use profile::ProfileService;
pub use registration::RegistrationService;
pub use utility::UtilityService;
