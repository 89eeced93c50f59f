//! Write paths: sales leads and product inquiries.
//!
//! Both go straight to the transport. No cache interaction, no retry; a
//! failed submission surfaces to the caller who decides whether to ask
//! the visitor to try again.

use anyhow::Result;

use super::ApiClient;
use super::types::{InquiryReceipt, LeadReceipt, NewInquiry, NewLead};

impl ApiClient {
    #[tracing::instrument(skip(self, lead))]
    pub async fn submit_lead(&self, lead: &NewLead) -> Result<LeadReceipt> {
        self.http.post_json("leads/", lead).await
    }

    #[tracing::instrument(skip(self, inquiry))]
    pub async fn submit_inquiry(&self, inquiry: &NewInquiry) -> Result<InquiryReceipt> {
        self.http.post_json("inquiries/", inquiry).await
    }
}
