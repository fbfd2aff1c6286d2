use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::domain::{EmailAddress, GuestName};
use crate::error::{Error, Result};
use crate::model::Invitation;

/// RSVP payload sent to the RSVP action, in its camelCase wire form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub invitation_id: String,
    /// Correlation id of one submit attempt; replays with the same id are acknowledged once
    #[serde(default = "Uuid::new_v4")]
    pub request_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub attendance: bool,
    #[serde(default)]
    pub guests_count: u8,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_answers: Option<BTreeMap<String, String>>,
}

/// What the RSVP action answers with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// A validated RSVP ready to be stored
#[derive(Debug, Clone)]
pub struct NewRsvp {
    pub invitation_id: String,
    pub request_id: Uuid,
    pub name: GuestName,
    pub email: Option<EmailAddress>,
    pub phone: Option<String>,
    pub attendance: bool,
    pub guests_count: u8,
    pub dietary_restrictions: Option<String>,
    pub message: Option<String>,
    pub music_suggestion: Option<String>,
    pub custom_answers: BTreeMap<String, String>,
}

impl NewRsvp {
    /// Validate a submission against the invitation it answers
    pub fn parse(submission: RsvpSubmission, invitation: &Invitation) -> Result<Self> {
        if submission.invitation_id != invitation.id() {
            return Err(Error::ParsingError(
                "RSVP does not belong to this invitation".into(),
            ));
        }

        let name: GuestName = submission.name.parse()?;
        let email = non_blank(submission.email)
            .map(|email| email.parse::<EmailAddress>())
            .transpose()?;

        let max_guests = invitation.features.rsvp.max_guests.max(1);
        let guests_count = if submission.attendance {
            match submission.guests_count {
                0 => 1,
                n if n > max_guests => {
                    return Err(Error::ParsingError(format!(
                        "At most {} guests can be confirmed",
                        max_guests
                    )))
                }
                n => n,
            }
        } else {
            0
        };

        let custom_answers: BTreeMap<String, String> = submission
            .custom_answers
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(id, answer)| non_blank(answer).map(|answer| (id, answer)))
            .collect();

        for question in &invitation.features.rsvp.custom_questions {
            if question.required && !custom_answers.contains_key(&question.id) {
                return Err(Error::ParsingError(format!(
                    "Please answer: {}",
                    question.label
                )));
            }
        }

        Ok(Self {
            invitation_id: submission.invitation_id,
            request_id: submission.request_id,
            name,
            email,
            phone: non_blank(submission.phone),
            attendance: submission.attendance,
            guests_count,
            dietary_restrictions: non_blank(submission.dietary_restrictions),
            message: non_blank(submission.message),
            music_suggestion: submission.music_suggestion.and_then(non_blank),
            custom_answers,
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
