//! Job openings and applications.

use anyhow::Result;
use reqwest::multipart::{Form, Part};

use super::types::{ApplicationReceipt, JobApplication, JobOpening};
use super::{ApiClient, Fetched};
use crate::http::{ApiError, not_found_as};

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn get_jobs(&self) -> Result<Fetched<Vec<JobOpening>>> {
        self.fetch_cached("careers/jobs/", &[], None).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_job(&self, slug: &str) -> Result<Fetched<JobOpening>> {
        Self::require_identifier("job opening", slug)?;
        let path = format!("careers/jobs/{}/", slug);
        self.fetch_cached(&path, &[], None)
            .await
            .map_err(|e| not_found_as(e, "job opening", slug))
    }

    /// Submits a job application as a multipart form with the resume
    /// attached. Goes straight to the transport: no cache, no retry.
    #[tracing::instrument(skip(self, application))]
    pub async fn submit_application(
        &self,
        application: &JobApplication,
    ) -> Result<ApplicationReceipt> {
        let resume = Part::bytes(application.resume.bytes.clone())
            .file_name(application.resume.file_name.clone())
            .mime_str(&application.resume.content_type)
            .map_err(|_| {
                ApiError::Validation(format!(
                    "invalid resume content type '{}'",
                    application.resume.content_type
                ))
            })?;

        let mut form = Form::new()
            .text("job_slug", application.job_slug.clone())
            .text("name", application.name.clone())
            .text("email", application.email.clone())
            .part("resume", resume);
        if let Some(phone) = &application.phone {
            form = form.text("phone", phone.clone());
        }
        if let Some(cover_letter) = &application.cover_letter {
            form = form.text("cover_letter", cover_letter.clone());
        }

        self.http.post_multipart("careers/applications/", form).await
    }
}
