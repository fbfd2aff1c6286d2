use std::time::Duration;

use anyhow::Context;

use reqwest::Client;

use url::Url;

use crate::component::RsvpSubmitter;
use crate::error::Result;
use crate::model::{RsvpSubmission, SubmitResponse};

/// Submits RSVPs to a remote RSVP action over HTTP
#[derive(Debug, Clone)]
pub struct RsvpClient {
    client: Client,
    action_url: Url,
}

impl RsvpClient {
    pub fn new(action_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client, action_url })
    }
}

#[async_trait::async_trait]
impl RsvpSubmitter for RsvpClient {
    /// POST the submission as JSON. Any JSON `{success, error}` answer is passed through,
    /// whatever the status code; anything else is a transport failure.
    #[tracing::instrument(name = "Send RSVP to remote action", skip(self, submission), fields(request_id = %submission.request_id))]
    async fn submit(&self, submission: &RsvpSubmission) -> Result<SubmitResponse> {
        let response = self
            .client
            .post(self.action_url.clone())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        match response.json::<SubmitResponse>().await {
            Ok(body) => Ok(body),
            Err(error) => {
                tracing::warn!("RSVP action answered {} without a readable body", status);
                Err(error.into())
            }
        }
    }
}
