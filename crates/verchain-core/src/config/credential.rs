//! Registry credential.

use std::fmt;

/// Environment variable holding the registry credential.
pub const API_KEY_ENV: &str = "SUPERTOKENS_API_KEY";

/// Secret sent as the `password` query parameter on every registry request.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read the credential from `SUPERTOKENS_API_KEY`.
    ///
    /// An unset variable yields an empty key; the registry rejects such
    /// requests and the lookup fails with the usual diagnostic.
    pub fn from_env() -> Self {
        match std::env::var(API_KEY_ENV) {
            Ok(value) => Self(value),
            Err(_) => {
                tracing::warn!("{} is not set; registry requests will be unauthenticated", API_KEY_ENV);
                Self(String::new())
            }
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
