//! HTTP client for the content API

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::listing::Listing;
use super::{ContentSource, PostFilter};
use crate::content::{Category, Post};
use crate::error::{ApiError, ApiResult};

/// Client for the REST content API
///
/// Without a base URL the client is offline: every fetch returns an empty
/// result and no request is made, so static builds work without a backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `https://host/api`)
    pub fn new(base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        if base_url.is_none() {
            tracing::warn!("No content API configured, running in offline mode");
        }

        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// A client that never touches the network
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_offline(&self) -> bool {
        self.base_url.is_none()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// URL of the post listing for a filter
    fn posts_url(base: &str, filter: &PostFilter) -> String {
        let query = filter.to_query_string();
        if query.is_empty() {
            format!("{}/posts/", base)
        } else {
            format!("{}/posts/?{}", base, query)
        }
    }

    /// GET a URL and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(url, status));
        }

        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ContentSource for ApiClient {
    async fn fetch_posts(&self, filter: &PostFilter) -> ApiResult<Vec<Post>> {
        let Some(base) = self.base_url.as_deref() else {
            return Ok(Vec::new());
        };

        let url = Self::posts_url(base, filter);
        let listing: Listing<Post> = self.get_json(&url).await?;
        Ok(listing.into_items())
    }

    async fn fetch_post(&self, slug: &str) -> Option<Post> {
        let base = self.base_url.as_deref()?;

        let url = format!("{}/posts/{}/", base, crate::helpers::encode_segment(slug));
        match self.get_json::<Post>(&url).await {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::debug!("Post {:?} not available: {}", slug, e);
                None
            }
        }
    }

    async fn fetch_categories(&self) -> ApiResult<Vec<Category>> {
        let Some(base) = self.base_url.as_deref() else {
            return Ok(Vec::new());
        };

        let url = format!("{}/categories/", base);
        let listing: Listing<Category> = self.get_json(&url).await?;
        Ok(listing.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_posts_url() {
        assert_eq!(
            ApiClient::posts_url("http://api", &PostFilter::new()),
            "http://api/posts/"
        );
        assert_eq!(
            ApiClient::posts_url("http://api", &PostFilter::new().trending().limit(6)),
            "http://api/posts/?limit=6&trending=true"
        );
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let client = ApiClient::new(Some("http://api.example.com/api/"));
        assert_eq!(client.base_url(), Some("http://api.example.com/api"));
        assert!(ApiClient::new(Some("  ")).is_offline());
    }

    #[tokio::test]
    async fn test_offline_short_circuits() {
        let client = ApiClient::offline();
        assert!(client.is_offline());
        assert!(client.fetch_posts(&PostFilter::new()).await.unwrap().is_empty());
        assert!(client.fetch_categories().await.unwrap().is_empty());
        assert!(client.fetch_post("anything").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_posts_unwraps_envelope_and_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .and(query_param("category", "sports"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    {"slug": "a", "title": "A", "body": "", "is_breaking": 1},
                    {"slug": "b", "title": "B", "body": "", "is_breaking": ""}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(Some(&server.uri()));
        let posts = client
            .fetch_posts(&PostFilter::new().category("sports"))
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert!(posts[0].is_breaking);
        assert!(!posts[1].is_breaking);
    }

    #[tokio::test]
    async fn test_fetch_posts_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"slug": "only", "title": "Only", "body": "x"}])),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(Some(&server.uri()));
        let posts = client.fetch_posts(&PostFilter::new()).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "only");
    }

    #[tokio::test]
    async fn test_error_status_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = ApiClient::new(Some(&server.uri()));
        let err = client.fetch_posts(&PostFilter::new()).await.unwrap_err();
        match err {
            ApiError::Status { status_text, .. } => {
                assert_eq!(status_text, "Internal Server Error")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_post_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/exists/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"slug": "exists", "title": "Exists", "body": "<p>hi</p>"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/posts/missing/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::new(Some(&server.uri()));
        assert_eq!(client.fetch_post("exists").await.unwrap().title, "Exists");
        assert!(client.fetch_post("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 1, "name": "News", "slug": "news", "subcategories": [
                        {"id": 5, "name": "Politics", "slug": "politics"}
                    ]},
                    {"id": 2, "name": "Sports", "slug": "sports", "subcategories": null}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(Some(&server.uri()));
        let categories = client.fetch_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].subcategories[0].slug, "politics");
        assert!(categories[1].subcategories.is_empty());
    }

    #[tokio::test]
    async fn test_null_body_keeps_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"slug": "a", "title": "A", "body": "<p>a</p>"},
                    {"slug": "b", "title": "B", "body": null},
                    {"slug": "c", "title": "C"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(Some(&server.uri()));
        let posts = client.fetch_posts(&PostFilter::new()).await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
        assert!(posts[1].body.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(Some(&format!("http://{}", addr)));
        match client.fetch_posts(&PostFilter::new()).await {
            Err(ApiError::Transport { url, .. }) => {
                assert_eq!(url, format!("http://{}/posts/", addr))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            client.fetch_categories().await,
            Err(ApiError::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(Some(&server.uri()));
        assert!(matches!(
            client.fetch_categories().await,
            Err(ApiError::Decode { .. })
        ));
    }
}
