//! Page fetching seam between the aggregation engine and the REST client

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Status, Subject, Timeline};
use std::sync::Arc;

/// Abstraction over fetching one timeline page, enabling testability.
///
/// The aggregation engine sees the remote service only through this trait.
/// Implementations return at most `page_size` statuses for the given 1-based
/// page; any remote failure surfaces as an error, which the engine treats
/// uniformly as "this page yielded nothing".
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page of the subject's timeline.
    async fn fetch_page(
        &self,
        subject: &Subject,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Status>>;
}

/// Production [`PageFetcher`] calling the `statuses/user_timeline` endpoint.
pub struct ApiPageFetcher {
    client: Arc<ApiClient>,
    access_token: String,
}

impl ApiPageFetcher {
    /// Create a fetcher bound to a client and a user's access token.
    pub fn new(client: Arc<ApiClient>, access_token: impl Into<String>) -> Self {
        Self {
            client,
            access_token: access_token.into(),
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for ApiPageFetcher {
    async fn fetch_page(
        &self,
        subject: &Subject,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Status>> {
        let subject_param = match subject {
            Subject::ScreenName(name) => ("screen_name", name.clone()),
            Subject::UserId(id) => ("uid", id.to_string()),
        };
        let params = [
            subject_param,
            ("count", page_size.to_string()),
            ("page", page.to_string()),
        ];
        let timeline: Timeline = self
            .client
            .get("statuses/user_timeline", &self.access_token, &params)
            .await?;
        Ok(timeline.statuses)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn fetcher_for(server: &MockServer) -> ApiPageFetcher {
        let client = ApiClient::new(&ApiConfig {
            base_url: server.uri(),
            ..Default::default()
        })
        .unwrap();
        ApiPageFetcher::new(Arc::new(client), "tok")
    }

    #[tokio::test]
    async fn screen_name_subject_sends_screen_name_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/statuses/user_timeline.json"))
            .and(query_param("screen_name", "zaku"))
            .and(query_param("count", "100"))
            .and(query_param("page", "3"))
            .and(query_param("access_token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statuses": [{"id": 5}, {"id": 4}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server).await;
        let statuses = fetcher
            .fetch_page(&Subject::screen_name("zaku"), 3, 100)
            .await
            .unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].id, 5);
    }

    #[tokio::test]
    async fn user_id_subject_sends_uid_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/statuses/user_timeline.json"))
            .and(query_param("uid", "1404376560"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"statuses": []})))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server).await;
        let statuses = fetcher
            .fetch_page(&Subject::user_id(1404376560), 1, 50)
            .await
            .unwrap();
        assert!(statuses.is_empty());
    }

    #[tokio::test]
    async fn remote_error_surfaces_as_err() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/statuses/user_timeline.json"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": "insufficient app permissions",
                "error_code": 10014,
                "request": "/2/statuses/user_timeline.json"
            })))
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server).await;
        let err = fetcher
            .fetch_page(&Subject::screen_name("zaku"), 1, 100)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Api { code: 10014, .. }));
    }
}
