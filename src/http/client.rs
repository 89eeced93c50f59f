//! HTTP transport bound to the backend API base URL.

use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{normalize, normalize_decode};
use super::retry::{RetryPolicy, with_retry};

/// Configured HTTP client for the backend API.
///
/// Carries the base URL, a default deadline, and a JSON content-type default.
/// Reads retry transient failures; writes go out exactly once.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Creates a transport for the given base URL and default timeout.
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("pharmgate/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins the base URL with a resource path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Performs a GET request and deserializes the JSON response.
    /// Transient failures are retried per the configured policy; a per-call
    /// timeout override replaces the client-wide deadline when given.
    #[tracing::instrument(skip(self, query, timeout_override))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        timeout_override: Option<Duration>,
    ) -> Result<T> {
        let url = self.url_for(path);
        debug!("GET {} with query {:?}...", url, query);

        with_retry(self.retry, &format!("GET {}", path), || async {
            let mut request = self.client.get(&url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(timeout) = timeout_override {
                request = request.timeout(timeout);
            }

            let response = request.send().await.map_err(normalize)?;
            let response = response.error_for_status().map_err(normalize)?;

            let payload = response.json::<T>().await.map_err(normalize_decode)?;

            Ok(payload)
        })
        .await
    }

    /// Performs a POST with a JSON body and decodes the JSON response.
    /// Never retried: an automatic retry could silently duplicate a
    /// submission.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(path);
        debug!("POST {}...", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(normalize)?;
        let response = response.error_for_status().map_err(normalize)?;

        response.json::<T>().await.map_err(normalize_decode)
    }

    /// Performs a POST with a multipart body (file-bearing submissions).
    /// Never retried, same as `post_json`.
    #[tracing::instrument(skip(self, form))]
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let url = self.url_for(path);
        debug!("POST {} (multipart)...", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(normalize)?;
        let response = response.error_for_status().map_err(normalize)?;

        response.json::<T>().await.map_err(normalize_decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::error::ApiError;

    fn quick_retry() -> RetryPolicy {
        RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(10),
        }
    }

    fn test_client(url: &str) -> HttpClient {
        HttpClient::new(url, Duration::from_secs(5), quick_retry()).unwrap()
    }

    #[test]
    fn test_url_for_joins_cleanly() {
        let client = test_client("http://backend.test/api/v1/");
        assert_eq!(client.base_url(), "http://backend.test/api/v1");
        assert_eq!(
            client.url_for("products/all/"),
            "http://backend.test/api/v1/products/all/"
        );
        assert_eq!(
            client.url_for("/products/all/"),
            "http://backend.test/api/v1/products/all/"
        );
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/faqs/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "question": "Q", "answer": "A"}]"#)
            .create_async()
            .await;

        #[derive(serde::Deserialize)]
        struct Faq {
            id: u64,
            question: String,
            answer: String,
        }

        let client = test_client(&server.url());
        let faqs: Vec<Faq> = client.get_json("faqs/", &[], None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].id, 1);
        assert_eq!(faqs[0].question, "Q");
        assert_eq!(faqs[0].answer, "A");
    }

    #[tokio::test]
    async fn test_get_json_sends_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/all/?category=centrifuges")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let products: Vec<serde_json::Value> = client
            .get_json("products/all/", &[("category", "centrifuges")], None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_get_json_retries_server_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/all/")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let result: Result<serde_json::Value> = client.get_json("products/all/", &[], None).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api, ApiError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_get_json_does_not_retry_client_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/all/")
            .with_status(400)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let result: Result<serde_json::Value> = client.get_json("products/all/", &[], None).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api, ApiError::Client { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_get_json_body_read_timeout_is_classified_and_retried() {
        use std::io::Write;

        let mut server = mockito::Server::new_async().await;
        // Opens the body, then stalls past the client deadline before
        // completing, so the timeout fires mid-read rather than on send.
        let mock = server
            .mock("GET", "/products/all/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(|writer| {
                writer.write_all(b"[")?;
                writer.flush()?;
                std::thread::sleep(Duration::from_millis(600));
                writer.write_all(b"]")
            })
            .expect(3)
            .create_async()
            .await;

        let client =
            HttpClient::new(&server.url(), Duration::from_millis(250), quick_retry()).unwrap();
        let result: Result<serde_json::Value> = client.get_json("products/all/", &[], None).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api, ApiError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_post_json_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/leads/")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "email": "buyer@lab.example"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 7, "status": "received"}"#)
            .create_async()
            .await;

        #[derive(serde::Serialize)]
        struct Lead<'a> {
            email: &'a str,
        }

        let client = test_client(&server.url());
        let receipt: serde_json::Value = client
            .post_json(
                "leads/",
                &Lead {
                    email: "buyer@lab.example",
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(receipt["id"], 7);
    }

    #[tokio::test]
    async fn test_post_json_never_retries_even_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/leads/")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let result: Result<serde_json::Value> =
            client.post_json("leads/", &serde_json::json!({})).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api, ApiError::Server { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_post_multipart_sends_form_boundary() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/careers/applications/")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 12}"#)
            .create_async()
            .await;

        let form = Form::new()
            .text("name", "Ada Kovacs")
            .part(
                "resume",
                reqwest::multipart::Part::bytes(b"%PDF-1.4 fake".to_vec())
                    .file_name("resume.pdf")
                    .mime_str("application/pdf")
                    .unwrap(),
            );

        let client = test_client(&server.url());
        let receipt: serde_json::Value = client
            .post_multipart("careers/applications/", form)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(receipt["id"], 12);
    }
}
