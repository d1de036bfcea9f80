//! Read-only view of request headers used for token extraction

use std::collections::HashMap;

/// Anything that can answer "what is the value of header X".
///
/// Header names are matched case-insensitively.
pub trait RequestHeaders {
    fn header(&self, name: &str) -> Option<&str>;
}

impl RequestHeaders for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl RequestHeaders for [(&str, &str)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}
