use std::sync::Arc;

use uuid::Uuid;

use crate::component::RsvpSubmitter;
use crate::error::{Error, Result};
use crate::model::{NewRsvp, RsvpSubmission, SubmitResponse};
use crate::repo::{InvitationRepo, RsvpRepo};

/// The RSVP action: validates a submission against its invitation and stores it
#[derive(Clone)]
pub struct RsvpAction {
    invitations: Arc<dyn InvitationRepo>,
    rsvps: Arc<dyn RsvpRepo>,
}

impl RsvpAction {
    pub fn new(invitations: Arc<dyn InvitationRepo>, rsvps: Arc<dyn RsvpRepo>) -> Self {
        Self { invitations, rsvps }
    }

    /// Store a submission, returning the RSVP id
    #[tracing::instrument(
        name = "Record an RSVP",
        skip(self, submission),
        fields(
            invitation_id = %submission.invitation_id,
            request_id = %submission.request_id,
            attendance = submission.attendance,
        )
    )]
    pub async fn record(&self, submission: RsvpSubmission) -> Result<Uuid> {
        let invitation = self.invitations.fetch(&submission.invitation_id).await?;
        if !invitation.features.show_rsvp {
            return Err(Error::ParsingError(
                "This invitation is not accepting RSVPs".into(),
            ));
        }

        let rsvp = NewRsvp::parse(submission, &invitation)?;
        let id = self.rsvps.insert(&rsvp).await?;

        tracing::info!("RSVP {} recorded", id);
        Ok(id)
    }
}

#[async_trait::async_trait]
impl RsvpSubmitter for RsvpAction {
    async fn submit(&self, submission: &RsvpSubmission) -> Result<SubmitResponse> {
        match self.record(submission.clone()).await {
            Ok(_) => Ok(SubmitResponse::ok()),
            Err(Error::ParsingError(message)) => Ok(SubmitResponse::failed(message)),
            Err(Error::NotFound(_)) => Ok(SubmitResponse::failed(
                "This invitation could not be found",
            )),
            Err(error) => Err(error),
        }
    }
}
