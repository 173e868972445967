//! OAuth2 authentication
//!
//! The service uses the standard authorization-code flow: direct the user to
//! the authorize URL, receive a code on the redirect URI, then exchange the
//! code for an access token to pass on API calls.

use crate::config::ApiConfig;
use crate::error::Result;
use crate::types::AccessToken;
use url::Url;

/// OAuth2 authorization-code flow helper
pub struct Authenticator {
    http: reqwest::Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl Authenticator {
    /// Create an authenticator for a registered application.
    pub fn new(
        config: &ApiConfig,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            http,
            base_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        })
    }

    /// Build the URL the user must visit to grant access.
    pub fn authorize_url(&self) -> Result<String> {
        let endpoint = self.base_url.join("oauth2/authorize")?;
        Ok(format!(
            "{endpoint}?redirect_uri={}&response_type=code&client_id={}",
            urlencoding::encode(&self.redirect_uri),
            self.client_id
        ))
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
        let endpoint = self.base_url.join("oauth2/access_token")?;
        let form = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
        ];
        let response = self.http.post(endpoint).form(&form).send().await?;
        super::decode_response(response).await
    }
}
