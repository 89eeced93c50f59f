//! Editorial content: blog posts, service offerings, FAQs.

use anyhow::Result;

use super::types::{BlogPost, Faq, ServiceOffering};
use super::{ApiClient, Fetched};
use crate::http::not_found_as;

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn get_blog_posts(&self) -> Result<Fetched<Vec<BlogPost>>> {
        self.fetch_cached("blog/posts/", &[], None).await
    }

    /// Single post by slug. A 404 from the backend becomes a not-found
    /// error carrying the slug.
    #[tracing::instrument(skip(self))]
    pub async fn get_blog_post(&self, slug: &str) -> Result<Fetched<BlogPost>> {
        Self::require_identifier("blog post", slug)?;
        let path = format!("blog/posts/{}/", slug);
        self.fetch_cached(&path, &[], None)
            .await
            .map_err(|e| not_found_as(e, "blog post", slug))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_services(&self) -> Result<Fetched<Vec<ServiceOffering>>> {
        self.fetch_cached("services/", &[], None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_service(&self, slug: &str) -> Result<Fetched<ServiceOffering>> {
        Self::require_identifier("service", slug)?;
        let path = format!("services/{}/", slug);
        self.fetch_cached(&path, &[], None)
            .await
            .map_err(|e| not_found_as(e, "service", slug))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_faqs(&self) -> Result<Fetched<Vec<Faq>>> {
        self.fetch_cached("faqs/", &[], None).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_config;
    use super::*;
    use crate::http::ApiError;

    #[tokio::test]
    async fn test_get_blog_post_parses_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/blog/posts/cold-chain-logistics/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "id": 9,
                    "slug": "cold-chain-logistics",
                    "title": "Cold Chain Logistics",
                    "excerpt": null,
                    "body": "Keeping reagents cold.",
                    "author": "M. Osei",
                    "published_at": "2024-11-02",
                    "tags": ["logistics"]
                }"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&test_config(&server.url())).unwrap();
        let post = client.get_blog_post("cold-chain-logistics").await.unwrap();

        mock.assert_async().await;
        assert_eq!(post.data.title, "Cold Chain Logistics");
        assert_eq!(post.data.tags, vec!["logistics".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_service_slug_becomes_not_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/services/nonexistent/")
            .with_status(404)
            .create_async()
            .await;

        let client = ApiClient::new(&test_config(&server.url())).unwrap();
        let err = client.get_service("nonexistent").await.unwrap_err();

        mock.assert_async().await;
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(
            api,
            ApiError::NotFound {
                resource: "service",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_blog_slug_is_rejected_locally() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = ApiClient::new(&test_config(&server.url())).unwrap();
        let err = client.get_blog_post("").await.unwrap_err();

        mock.assert_async().await;
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_service_listing_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/services/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "id": 1,
                    "slug": "equipment-calibration",
                    "title": "Equipment Calibration",
                    "summary": null,
                    "description": "On-site calibration visits.",
                    "icon": null
                }]"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(&test_config(&server.url())).unwrap();
        let cold = client.get_services().await.unwrap();
        let warm = client.get_services().await.unwrap();

        mock.assert_async().await;
        assert!(!cold.from_cache);
        assert!(warm.from_cache);
        assert_eq!(warm.data[0].slug, "equipment-calibration");
    }
}
