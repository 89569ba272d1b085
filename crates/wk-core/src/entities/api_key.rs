use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const MAX_LEN: usize = 64;

/// Upstream API key, validated at the presentation boundary.
///
/// The key is embedded in upstream request paths, so only URL-safe characters
/// are accepted. `Debug` redacts the value; `expose` hands it out for request
/// construction.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate and wrap a raw key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidApiKey`] if the key is empty, longer than
    /// 64 characters, or contains anything outside `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(CoreError::InvalidApiKey("key is empty".into()));
        }
        if key.len() > MAX_LEN {
            return Err(CoreError::InvalidApiKey(format!(
                "key is longer than {MAX_LEN} characters"
            )));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(CoreError::InvalidApiKey(
                "key contains characters outside [A-Za-z0-9_-]".into(),
            ));
        }
        Ok(Self(key.to_string()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ASCII-only after validation, so byte slicing is safe.
        let tail = &self.0[self.0.len().saturating_sub(4)..];
        write!(f, "ApiKey(…{tail})")
    }
}

impl FromStr for ApiKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ApiKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ApiKey> for String {
    fn from(key: ApiKey) -> Self {
        key.0
    }
}
