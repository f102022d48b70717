use crate::error::ConfigError;

/// Environment variable naming the wiki base address, e.g.
/// `https://en.wikipedia.org`.
pub const BASE_URL_VAR: &str = "WIKI_BASE_URL";

/// Environment variable holding an optional bearer token.
pub const AUTH_TOKEN_VAR: &str = "WIKI_AUTH_TOKEN";

/// Connection parameters for one wiki, resolved once at process start and
/// passed by reference into [`crate::WikiClient::new`].
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// Base address with any trailing slash stripped.
    pub base_url: String,
    /// Attached as a bearer token to every call when present.
    pub auth_token: Option<String>,
}

impl WikiConfig {
    /// Builds a config, rejecting a missing or empty base address.
    pub fn new(
        base_url: Option<String>,
        auth_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let auth_token = auth_token
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(Self {
            base_url,
            auth_token,
        })
    }

    /// Reads [`BASE_URL_VAR`] and [`AUTH_TOKEN_VAR`]. Intended to be called
    /// exactly once from `main`; the client itself never touches the
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            std::env::var(BASE_URL_VAR).ok(),
            std::env::var(AUTH_TOKEN_VAR).ok(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash() {
        let config = WikiConfig::new(Some("https://wiki.example.org/".into()), None).unwrap();
        assert_eq!(config.base_url, "https://wiki.example.org");
    }

    #[test]
    fn missing_base_url_is_rejected() {
        assert!(matches!(
            WikiConfig::new(None, None),
            Err(ConfigError::MissingBaseUrl)
        ));
        assert!(matches!(
            WikiConfig::new(Some("   ".into()), None),
            Err(ConfigError::MissingBaseUrl)
        ));
    }

    #[test]
    fn empty_token_means_unauthenticated() {
        let config =
            WikiConfig::new(Some("https://wiki.example.org".into()), Some("".into())).unwrap();
        assert!(config.auth_token.is_none());
    }
}
