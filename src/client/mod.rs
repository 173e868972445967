//! REST API client
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] and speaks the service's
//! request/response conventions: versioned `.json` method paths, the access
//! token as a query parameter, JSON bodies on success, and a structured error
//! payload on non-success statuses. The base URL is configurable so tests can
//! point the client at a local mock server.

mod auth;

pub use auth::Authenticator;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::types::ApiErrorPayload;
use serde::de::DeserializeOwned;
use url::Url;

/// API method name for the multipart status-with-picture endpoint
const UPLOAD_METHOD: &str = "statuses/upload";

/// Request parameters as key/value pairs.
///
/// Pairs with an empty key or empty value are skipped when the request is
/// built. The access token must not be included; it is a separate argument
/// on every call.
pub type Params<'a> = &'a [(&'a str, String)];

/// HTTP client for the remote API
///
/// Cheap to share behind an [`Arc`](std::sync::Arc); the underlying
/// [`reqwest::Client`] pools connections internally.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_version: String,
}

impl ApiClient {
    /// Create a client from endpoint configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            http,
            base_url,
            api_version: config.api_version.clone(),
        })
    }

    /// Call an API method with a GET request.
    ///
    /// `method` is the bare method name, e.g. `statuses/user_timeline`; the
    /// versioned `.json` path is derived from it. The 200-response body is
    /// decoded into `T`; any other status is decoded into the service's error
    /// payload and surfaced as [`Error::Api`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        token: &str,
        params: Params<'_>,
    ) -> Result<T> {
        let url = self.method_url(method)?;
        let query = with_token(token, params);
        let response = self.http.get(url).query(&query).send().await?;
        decode_response(response).await
    }

    /// Call an API method with a form-encoded POST request.
    ///
    /// The access token is carried both in the query string and in the form
    /// body, matching the service's documented convention.
    pub async fn post<T: DeserializeOwned>(
        &self,
        method: &str,
        token: &str,
        params: Params<'_>,
    ) -> Result<T> {
        let url = self.method_url(method)?;
        let form = with_token(token, params);
        let response = self
            .http
            .post(url)
            .query(&[("access_token", token)])
            .form(&form)
            .send()
            .await?;
        decode_response(response).await
    }

    /// Post a status with an attached picture via multipart upload.
    ///
    /// `image_format` is the file extension used to name the `pic` part,
    /// e.g. `jpg` or `png`. Params must not include a `pic` entry.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        token: &str,
        params: Params<'_>,
        image: Vec<u8>,
        image_format: &str,
    ) -> Result<T> {
        let url = self.method_url(UPLOAD_METHOD)?;
        let part =
            reqwest::multipart::Part::bytes(image).file_name(format!("image.{image_format}"));
        let mut form = reqwest::multipart::Form::new().part("pic", part);
        for (key, value) in params {
            if !key.is_empty() && !value.is_empty() {
                form = form.text(key.to_string(), value.clone());
            }
        }
        let response = self
            .http
            .post(url)
            .query(&[("access_token", token)])
            .multipart(form)
            .send()
            .await?;
        decode_response(response).await
    }

    /// Build `{base}/{version}/{method}.json` for an API method name.
    fn method_url(&self, method: &str) -> Result<Url> {
        let path = format!("{}/{}.json", self.api_version, method);
        Ok(self.base_url.join(&path)?)
    }
}

/// Prepend the access token and drop empty keys/values.
fn with_token<'a>(token: &'a str, params: Params<'a>) -> Vec<(&'a str, &'a str)> {
    let mut pairs = Vec::with_capacity(params.len() + 1);
    pairs.push(("access_token", token));
    for (key, value) in params {
        if !key.is_empty() && !value.is_empty() {
            pairs.push((*key, value.as_str()));
        }
    }
    pairs
}

/// Decode a response body: JSON into `T` on success, the error payload into
/// [`Error::Api`] otherwise.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;
    if status.is_success() {
        Ok(serde_json::from_slice(&body)?)
    } else {
        let payload: ApiErrorPayload = serde_json::from_slice(&body)?;
        Err(Error::Api {
            code: payload.error_code,
            message: payload.error,
            request: payload.request,
        })
    }
}
