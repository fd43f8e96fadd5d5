//! OIDC (OpenID Connect) configuration.
//!
//! Sign-in is delegated to Google through standard OIDC discovery. The issuer
//! is configurable so a different provider can stand in during development.

use serde::{Deserialize, Serialize};

/// Configuration for the OIDC identity provider.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// The OIDC issuer URL used for discovery.
    /// Default: "https://accounts.google.com"
    #[serde(default = "default_issuer_url")]
    issuer_url: String,
    /// The OAuth2 client ID registered with the provider.
    client_id: String,
    /// The OAuth2 client secret.
    client_secret: String,
    /// The redirect URI for the callback (e.g., "https://api.example.com/auth/google/callback").
    redirect_uri: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,email,profile"
    #[serde(default = "default_scopes")]
    scopes: String,
}

fn default_issuer_url() -> String {
    "https://accounts.google.com".to_string()
}

fn default_scopes() -> String {
    "openid,email,profile".to_string()
}

impl OidcConfig {
    /// Returns the OIDC issuer URL.
    #[must_use]
    pub fn issuer_url(&self) -> &str {
        &self.issuer_url
    }

    /// Returns the OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the OAuth2 redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the OAuth2 scopes to request, parsed from comma-separated string.
    ///
    /// `openid` is implied by the authorization flow and is skipped here.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != "openid")
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "https://api.example.com/auth/google/callback"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.issuer_url(), "https://accounts.google.com");
        assert_eq!(config.client_id(), "my-client");
        assert_eq!(config.client_secret(), "secret");
        assert_eq!(
            config.redirect_uri(),
            "https://api.example.com/auth/google/callback"
        );
        assert_eq!(config.scopes(), vec!["email", "profile"]);
    }

    #[test]
    fn issuer_can_be_overridden() {
        let json = r#"{
            "issuer_url": "http://localhost:8080/realms/dev",
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "http://localhost:3050/auth/google/callback",
            "scopes": "openid,email,profile,custom"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.issuer_url(), "http://localhost:8080/realms/dev");
        assert_eq!(config.scopes(), vec!["email", "profile", "custom"]);
    }

    #[test]
    fn scopes_parses_comma_separated() {
        let json = r#"{
            "client_id": "my-client",
            "client_secret": "secret",
            "redirect_uri": "https://api.example.com/callback",
            "scopes": "openid, email, profile,"
        }"#;

        let config: OidcConfig = serde_json::from_str(json).expect("deserialize");

        assert_eq!(config.scopes(), vec!["email", "profile"]);
    }
}
