use std::collections::HashMap;

use actix_web::{post, web, HttpResponse};

use maud::Markup;

use crate::action::RsvpAction;
use crate::component::rsvp_form::GENERIC_ERROR;
use crate::component::{Clock, RsvpFields, RsvpForm, RsvpSubmitter};
use crate::controller::invitations::{render_page, PageOptions, PageQuery};
use crate::error::{Error, RestResult};
use crate::model::{RsvpSubmission, SubmitResponse};
use crate::repo::{InvitationRepo, SongRepo};

/// HTML form post: run the RSVP form flow and render the page in its resulting state
#[tracing::instrument(
    name = "Submit an RSVP form",
    skip(form, invitations, submitter, songs, clock, options)
)]
#[post("/{id}/rsvp")]
pub(crate) async fn submit_form(
    path: web::Path<(String,)>,
    form: web::Form<HashMap<String, String>>,
    invitations: web::Data<dyn InvitationRepo>,
    submitter: web::Data<dyn RsvpSubmitter>,
    songs: web::Data<dyn SongRepo>,
    clock: web::Data<dyn Clock>,
    options: web::Data<PageOptions>,
) -> RestResult<Markup> {
    let (id,) = path.into_inner();
    let invitation = invitations.fetch(&id).await?;

    let query = PageQuery::from_form(&form);
    let mut rsvp = RsvpForm::new(&invitation).with_fields(RsvpFields::from_form(&form));
    let state = rsvp.submit(submitter.get_ref()).await;
    tracing::info!("RSVP form ended in {:?}", state);

    render_page(
        &invitation,
        &query,
        &rsvp,
        songs.get_ref(),
        clock.get_ref(),
        options.get_ref(),
    )
    .await
}

/// The RSVP action as a JSON endpoint
#[tracing::instrument(name = "Record an RSVP through the API", skip(body, action))]
#[post("/rsvp")]
pub(crate) async fn record(
    body: web::Json<RsvpSubmission>,
    action: web::Data<RsvpAction>,
) -> HttpResponse {
    match action.record(body.into_inner()).await {
        Ok(_) => HttpResponse::Created().json(SubmitResponse::ok()),
        Err(Error::ParsingError(message)) => {
            HttpResponse::BadRequest().json(SubmitResponse::failed(message))
        }
        Err(Error::NotFound(_)) => HttpResponse::NotFound()
            .json(SubmitResponse::failed("This invitation could not be found")),
        Err(error) => {
            tracing::error!(error.cause_chain = ?error, "Failed to record an RSVP");
            HttpResponse::InternalServerError().json(SubmitResponse::failed(GENERIC_ERROR))
        }
    }
}
