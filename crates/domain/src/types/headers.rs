//! Caller-supplied correlation headers

use std::collections::BTreeMap;

use crate::constants::{HEADER_FACILITY_ID, HEADER_PARTNER_ID, HEADER_PATIENT_ID, HEADER_USER_ID};

/// Correlation headers forwarded unchanged on a single API call.
///
/// The well-known identifiers have helpers; anything else goes through
/// [`RequestHeaders::insert`]. Empty values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: BTreeMap<String, String>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(self, value: impl Into<String>) -> Self {
        self.with(HEADER_USER_ID, value)
    }

    pub fn partner_id(self, value: impl Into<String>) -> Self {
        self.with(HEADER_PARTNER_ID, value)
    }

    /// Health facility (HIP) identifier.
    pub fn facility_id(self, value: impl Into<String>) -> Self {
        self.with(HEADER_FACILITY_ID, value)
    }

    pub fn patient_id(self, value: impl Into<String>) -> Self {
        self.with(HEADER_PATIENT_ID, value)
    }

    /// Builder-style [`RequestHeaders::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set an arbitrary header. An empty value removes it.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            self.entries.remove(&name);
        } else {
            self.entries.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_headers_use_fixed_names() {
        let headers = RequestHeaders::new().user_id("u-1").facility_id("hip-9").partner_id("p-2");

        assert_eq!(headers.get("X-User-Id"), Some("u-1"));
        assert_eq!(headers.get("X-Hip-Id"), Some("hip-9"));
        assert_eq!(headers.get("X-Partner-Id"), Some("p-2"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn empty_values_are_not_kept() {
        let headers = RequestHeaders::new().user_id("").with("X-Trace", "abc").with("X-Trace", "");
        assert!(headers.is_empty());
    }
}
