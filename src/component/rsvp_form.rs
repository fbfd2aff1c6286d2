use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use uuid::Uuid;

use crate::error::Result;
use crate::model::{Invitation, RsvpSubmission, SubmitResponse};

/// Shown when the RSVP action fails without saying why
pub const GENERIC_ERROR: &str = "We could not send your RSVP. Please try again.";

/// Prefix of form inputs holding custom question answers, e.g. `custom_shuttle`
pub const CUSTOM_FIELD_PREFIX: &str = "custom_";

/// The RSVP action a form submits to
#[async_trait::async_trait]
pub trait RsvpSubmitter: Send + Sync {
    async fn submit(&self, submission: &RsvpSubmission) -> Result<SubmitResponse>;
}

/// Where the form is in its submit cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("A submission is already in flight")]
    AlreadySubmitting,
    #[error("The RSVP was already sent")]
    AlreadySubmitted,
    #[error("{0}")]
    Invalid(String),
}

/// Values typed into the RSVP form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `None` until the guest picks yes or no
    pub attendance: Option<bool>,
    pub guests_count: u8,
    pub dietary_restrictions: String,
    pub message: String,
    pub music_suggestion: String,
    pub custom_answers: BTreeMap<String, String>,
}

impl Default for RsvpFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            attendance: None,
            guests_count: 1,
            dietary_restrictions: String::new(),
            message: String::new(),
            music_suggestion: String::new(),
            custom_answers: BTreeMap::new(),
        }
    }
}

impl RsvpFields {
    /// Read the fields of a posted HTML form. Unknown keys are ignored.
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let get = |key: &str| form.get(key).cloned().unwrap_or_default();

        let attendance = match form.get("attendance").map(|v| v.as_str()) {
            Some("yes") | Some("true") => Some(true),
            Some("no") | Some("false") => Some(false),
            _ => None,
        };

        let custom_answers = form
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(CUSTOM_FIELD_PREFIX)
                    .map(|id| (id.to_string(), value.clone()))
            })
            .collect();

        Self {
            name: get("name"),
            email: get("email"),
            phone: get("phone"),
            attendance,
            guests_count: form
                .get("guests_count")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1),
            dietary_restrictions: get("dietary_restrictions"),
            message: get("message"),
            music_suggestion: get("music_suggestion"),
            custom_answers,
        }
    }
}

/// A guest's confirmation, kept for the success view after the fields are cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub name: String,
    pub attendance: bool,
}

/// RSVP form flow: `Editing -> Submitting -> Success | Error`.
///
/// Fields stay editable while `Editing` or `Error`. A failed submit keeps them,
/// a successful one clears them.
#[derive(Debug, Clone)]
pub struct RsvpForm {
    invitation_id: String,
    required_questions: Vec<(String, String)>,
    fields: RsvpFields,
    state: FormState,
    confirmation: Option<Confirmation>,
}

impl RsvpForm {
    pub fn new(invitation: &Invitation) -> Self {
        let required_questions = invitation
            .features
            .rsvp
            .custom_questions
            .iter()
            .filter(|q| q.required)
            .map(|q| (q.id.clone(), q.label.clone()))
            .collect();

        Self {
            invitation_id: invitation.id().to_string(),
            required_questions,
            fields: RsvpFields::default(),
            state: FormState::Editing,
            confirmation: None,
        }
    }

    pub fn with_fields(mut self, fields: RsvpFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &RsvpFields {
        &self.fields
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.state, FormState::Editing | FormState::Error(_))
    }

    /// Mutable fields, only while the form accepts input
    pub fn fields_mut(&mut self) -> Option<&mut RsvpFields> {
        if self.is_editable() {
            Some(&mut self.fields)
        } else {
            None
        }
    }

    /// Validate and lock the form for submission.
    ///
    /// Each call builds a submission with a fresh request id. Invalid input moves the
    /// form to `Error` with the fields untouched.
    pub fn begin_submit(&mut self) -> std::result::Result<RsvpSubmission, FormError> {
        match self.state {
            FormState::Submitting => return Err(FormError::AlreadySubmitting),
            FormState::Success => return Err(FormError::AlreadySubmitted),
            FormState::Editing | FormState::Error(_) => {}
        }

        let attendance = match self.validate() {
            Ok(attendance) => attendance,
            Err(message) => {
                self.state = FormState::Error(message.clone());
                return Err(FormError::Invalid(message));
            }
        };

        let fields = &self.fields;
        let music_suggestion = Some(fields.music_suggestion.trim())
            .filter(|s| !s.is_empty())
            .map(String::from);
        let custom_answers = Some(fields.custom_answers.clone()).filter(|a| !a.is_empty());

        let submission = RsvpSubmission {
            invitation_id: self.invitation_id.clone(),
            request_id: Uuid::new_v4(),
            name: fields.name.trim().to_string(),
            email: fields.email.trim().to_string(),
            phone: fields.phone.trim().to_string(),
            attendance,
            guests_count: if attendance { fields.guests_count.max(1) } else { 0 },
            dietary_restrictions: fields.dietary_restrictions.clone(),
            message: fields.message.clone(),
            music_suggestion,
            custom_answers,
        };

        self.state = FormState::Submitting;
        Ok(submission)
    }

    /// Apply the RSVP action's answer to an in-flight submission
    pub fn finish(&mut self, result: Result<SubmitResponse>) {
        if self.state != FormState::Submitting {
            tracing::warn!("Ignoring an RSVP response with no submission in flight");
            return;
        }

        match result {
            Ok(SubmitResponse { success: true, .. }) => {
                self.confirmation = Some(Confirmation {
                    name: self.fields.name.trim().to_string(),
                    attendance: self.fields.attendance.unwrap_or(false),
                });
                self.fields = RsvpFields::default();
                self.state = FormState::Success;
            }
            Ok(SubmitResponse { error, .. }) => {
                let message = error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_ERROR.to_string());
                self.state = FormState::Error(message);
            }
            Err(error) => {
                tracing::error!(error.cause_chain = ?error, "RSVP submission failed");
                self.state = FormState::Error(GENERIC_ERROR.to_string());
            }
        }
    }

    /// Submit through `submitter` and settle the form. Failures are not retried.
    #[tracing::instrument(name = "Submit RSVP form", skip(self, submitter), fields(invitation_id = %self.invitation_id))]
    pub async fn submit<S>(&mut self, submitter: &S) -> &FormState
    where
        S: RsvpSubmitter + ?Sized,
    {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(error) => {
                tracing::debug!("RSVP not sent: {}", error);
                return &self.state;
            }
        };

        let result = submitter.submit(&submission).await;
        self.finish(result);
        &self.state
    }

    /// Back to a blank form after a confirmation
    pub fn reset(&mut self) {
        if self.state == FormState::Success {
            self.state = FormState::Editing;
            self.confirmation = None;
        }
    }

    fn validate(&self) -> std::result::Result<bool, String> {
        if self.fields.name.trim().is_empty() {
            return Err("Please tell us your name".into());
        }
        let attendance = self
            .fields
            .attendance
            .ok_or_else(|| String::from("Please let us know if you can attend"))?;

        for (id, label) in &self.required_questions {
            let answered = self
                .fields
                .custom_answers
                .get(id)
                .map(|answer| !answer.trim().is_empty())
                .unwrap_or(false);
            if !answered {
                return Err(format!("Please answer: {}", label));
            }
        }
        Ok(attendance)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use claims::{assert_err, assert_matches, assert_ok};

    use super::*;
    use crate::error::Error;

    fn invitation() -> Invitation {
        serde_json::from_str(
            r#"{
                "metadata": { "id": "ana-bruno" },
                "logistics": { "event_date": "2026-08-22T18:00:00" },
                "features": { "rsvp": { "custom_questions": [
                    { "id": "shuttle", "label": "Shuttle?", "kind": "yes_no", "required": true }
                ] } }
            }"#,
        )
        .unwrap()
    }

    fn filled_form() -> RsvpForm {
        let mut form = RsvpForm::new(&invitation());
        let fields = form.fields_mut().unwrap();
        fields.name = "Carla Dias".into();
        fields.email = "carla@example.com".into();
        fields.attendance = Some(true);
        fields.guests_count = 2;
        fields
            .custom_answers
            .insert("shuttle".into(), "yes".into());
        form
    }

    /// Records submissions and answers with a canned response
    struct StubSubmitter {
        response: fn() -> Result<SubmitResponse>,
        received: Mutex<Vec<RsvpSubmission>>,
    }

    impl StubSubmitter {
        fn new(response: fn() -> Result<SubmitResponse>) -> Self {
            Self {
                response,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl RsvpSubmitter for StubSubmitter {
        async fn submit(&self, submission: &RsvpSubmission) -> Result<SubmitResponse> {
            self.received.lock().unwrap().push(submission.clone());
            (self.response)()
        }
    }

    #[tokio::test]
    async fn success_clears_fields() {
        let submitter = StubSubmitter::new(|| Ok(SubmitResponse::ok()));
        let mut form = filled_form();

        assert_eq!(form.submit(&submitter).await, &FormState::Success);
        assert_eq!(form.fields(), &RsvpFields::default());
        assert_eq!(
            form.confirmation(),
            Some(&Confirmation {
                name: "Carla Dias".into(),
                attendance: true
            })
        );

        let received = submitter.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].invitation_id, "ana-bruno");
        assert_eq!(received[0].guests_count, 2);
        assert_eq!(
            received[0].custom_answers.as_ref().unwrap()["shuttle"],
            "yes"
        );
    }

    #[tokio::test]
    async fn rejected_response_keeps_fields_and_message() {
        let submitter = StubSubmitter::new(|| Ok(SubmitResponse::failed("X")));
        let mut form = filled_form();
        let before = form.fields().clone();

        assert_eq!(form.submit(&submitter).await, &FormState::Error("X".into()));
        assert_eq!(form.fields(), &before);
        assert!(form.is_editable());
    }

    #[tokio::test]
    async fn transport_failure_shows_generic_message() {
        let submitter = StubSubmitter::new(|| Err(Error::ParsingError("boom".into())));
        let mut form = filled_form();
        let before = form.fields().clone();

        assert_eq!(
            form.submit(&submitter).await,
            &FormState::Error(GENERIC_ERROR.into())
        );
        assert_eq!(form.fields(), &before);
    }

    #[tokio::test]
    async fn error_state_can_resubmit() {
        let failing = StubSubmitter::new(|| Ok(SubmitResponse::failed("busy")));
        let working = StubSubmitter::new(|| Ok(SubmitResponse::ok()));
        let mut form = filled_form();

        form.submit(&failing).await;
        assert_eq!(form.submit(&working).await, &FormState::Success);
    }

    #[tokio::test]
    async fn missing_required_fields_never_reach_the_action() {
        let submitter = StubSubmitter::new(|| Ok(SubmitResponse::ok()));
        let mut form = RsvpForm::new(&invitation());
        form.fields_mut().unwrap().name = "Carla".into();

        assert_matches!(form.submit(&submitter).await, FormState::Error(_));
        assert!(submitter.received.lock().unwrap().is_empty());
        assert_eq!(form.fields().name, "Carla");
    }

    #[test]
    fn fields_are_locked_while_submitting() {
        let mut form = filled_form();
        assert_ok!(form.begin_submit());

        assert_eq!(form.state(), &FormState::Submitting);
        assert!(form.fields_mut().is_none());
        assert_eq!(form.begin_submit(), Err(FormError::AlreadySubmitting));
    }

    #[test]
    fn every_attempt_gets_a_new_request_id() {
        let mut form = filled_form();
        let first = form.begin_submit().unwrap();
        form.finish(Ok(SubmitResponse::failed("later")));
        let second = form.begin_submit().unwrap();

        assert_ne!(first.request_id, second.request_id);
    }

    #[test]
    fn declining_sends_zero_guests() {
        let mut form = filled_form();
        form.fields_mut().unwrap().attendance = Some(false);

        let submission = form.begin_submit().unwrap();
        assert!(!submission.attendance);
        assert_eq!(submission.guests_count, 0);
    }

    #[test]
    fn reset_returns_to_editing_after_success() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish(Ok(SubmitResponse::ok()));
        assert_err!(form.begin_submit());

        form.reset();
        assert_eq!(form.state(), &FormState::Editing);
        assert!(form.confirmation().is_none());
    }

    #[test]
    fn stray_response_is_ignored() {
        let mut form = filled_form();
        form.finish(Ok(SubmitResponse::ok()));
        assert_eq!(form.state(), &FormState::Editing);
        assert_eq!(form.fields().name, "Carla Dias");
    }

    #[test]
    fn fields_read_from_posted_form() {
        let form: HashMap<String, String> = [
            ("name", "Carla"),
            ("attendance", "no"),
            ("guests_count", "3"),
            ("custom_shuttle", "yes"),
            ("unrelated", "x"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let fields = RsvpFields::from_form(&form);
        assert_eq!(fields.name, "Carla");
        assert_eq!(fields.attendance, Some(false));
        assert_eq!(fields.guests_count, 3);
        assert_eq!(fields.custom_answers["shuttle"], "yes");
        assert_eq!(fields.custom_answers.len(), 1);
    }
}
