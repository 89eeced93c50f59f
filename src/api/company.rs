//! Company pages: offices, profile, testimonials, partners.
//!
//! Offices back the contact page and stay strict. The other three feed
//! decorative widgets and degrade to empty content when the backend is
//! slow or down.

use anyhow::Result;

use super::types::{CompanyInfo, Office, Partner, Testimonial};
use super::{ApiClient, BestEffort, Fetched};

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn get_offices(&self) -> Result<Fetched<Vec<Office>>> {
        self.fetch_cached("company/offices/", &[], None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_company_info(&self) -> BestEffort<CompanyInfo> {
        self.fetch_cached_or_default("company/info/", &[]).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_testimonials(&self) -> BestEffort<Vec<Testimonial>> {
        self.fetch_cached_or_default("company/testimonials/", &[])
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_partners(&self) -> BestEffort<Vec<Partner>> {
        self.fetch_cached_or_default("company/partners/", &[]).await
    }
}
