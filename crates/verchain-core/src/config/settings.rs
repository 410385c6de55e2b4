//! Registry location settings.

use anyhow::Context;
use url::Url;

/// Default registry base URL; edge paths are joined onto it.
pub const DEFAULT_REGISTRY_URL: &str = "https://api.supertokens.io/0/";

/// Environment variable overriding the registry base URL.
pub const REGISTRY_URL_ENV: &str = "VERCHAIN_REGISTRY_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    base_url: Url,
}

impl RegistrySettings {
    /// Build settings from an explicit base URL.
    ///
    /// The URL must be absolute http(s). A trailing slash is added when
    /// missing so relative edge paths land under the base path.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let url = Url::parse(&normalized)
            .with_context(|| format!("Invalid registry URL '{}'", base_url))?;

        match url.scheme() {
            "http" | "https" => {}
            other => anyhow::bail!(
                "Registry URL must use http or https; got '{}://' in '{}'",
                other,
                base_url
            ),
        }
        if url.host_str().is_none() {
            anyhow::bail!("Registry URL must include a host: '{}'", base_url);
        }

        Ok(Self { base_url: url })
    }

    /// Resolve settings from an optional override, then `VERCHAIN_REGISTRY_URL`,
    /// then the public registry.
    pub fn resolve(override_url: Option<&str>) -> anyhow::Result<Self> {
        let from_env = std::env::var(REGISTRY_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());

        match override_url.map(str::to_string).or(from_env) {
            Some(url) => Self::new(&url),
            None => Self::new(DEFAULT_REGISTRY_URL),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_public_registry() {
        let settings = RegistrySettings::new(DEFAULT_REGISTRY_URL).unwrap();
        assert_eq!(settings.base_url().as_str(), DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn appends_trailing_slash() {
        let settings = RegistrySettings::new("http://127.0.0.1:8080/0").unwrap();
        assert_eq!(settings.base_url().as_str(), "http://127.0.0.1:8080/0/");
    }

    #[test]
    fn override_wins() {
        let settings = RegistrySettings::resolve(Some("https://registry.example/v0/")).unwrap();
        assert_eq!(settings.base_url().as_str(), "https://registry.example/v0/");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = RegistrySettings::new("ftp://registry.example/").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(RegistrySettings::new("not a url").is_err());
    }
}
