use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse, Responder};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::controller::invitations::{is_flag, PageOptions};
use crate::domain::SkinId;
use crate::error::{RestError, RestResult};
use crate::model::{Invitation, NewSongSuggestion, SongStatus};
use crate::render::page_path;
use crate::repo::{InvitationRepo, SongRepo};

/// Form and JSON body of a song suggestion
#[derive(Debug, Deserialize)]
pub struct SongForm {
    guest_name: String,
    song_title: String,
    artist: String,
    /// Page choices carried by the HTML form
    #[serde(default)]
    skin: Option<String>,
    #[serde(default)]
    preview: Option<String>,
}

#[derive(Debug, Serialize)]
struct SuggestionCreated {
    id: Uuid,
    status: SongStatus,
}

/// Validate and store a suggestion as pending
async fn store_suggestion(
    invitation: &Invitation,
    form: &SongForm,
    songs: &dyn SongRepo,
) -> RestResult<Uuid> {
    if !invitation.features.rsvp.allow_song_suggestions {
        return Err(RestError::ParseError(
            "This invitation does not take song suggestions".into(),
        ));
    }

    let suggestion = NewSongSuggestion::parse(
        invitation.id(),
        &form.guest_name,
        &form.song_title,
        &form.artist,
    )?;
    let id = songs.insert(&suggestion).await?;

    tracing::info!("Song suggestion {} stored as pending", id);
    Ok(id)
}

#[tracing::instrument(name = "List approved songs", skip(invitations, songs))]
#[get("/invitations/{id}/songs")]
pub(crate) async fn list(
    path: web::Path<(String,)>,
    invitations: web::Data<dyn InvitationRepo>,
    songs: web::Data<dyn SongRepo>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();
    let invitation = invitations.fetch(&id).await?;
    let approved = songs.fetch_approved(invitation.id()).await?;

    Ok(HttpResponse::Ok().json(approved))
}

#[tracing::instrument(name = "Suggest a song", skip(invitations, songs))]
#[post("/invitations/{id}/songs")]
pub(crate) async fn suggest(
    path: web::Path<(String,)>,
    body: web::Json<SongForm>,
    invitations: web::Data<dyn InvitationRepo>,
    songs: web::Data<dyn SongRepo>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();
    let invitation = invitations.fetch(&id).await?;
    let id = store_suggestion(&invitation, &body, songs.get_ref()).await?;

    Ok(HttpResponse::Created().json(SuggestionCreated {
        id,
        status: SongStatus::Pending,
    }))
}

/// HTML form post, redirecting back to the music section
#[tracing::instrument(name = "Suggest a song from the page", skip(invitations, songs, options))]
#[post("/{id}/songs")]
pub(crate) async fn suggest_form(
    path: web::Path<(String,)>,
    form: web::Form<SongForm>,
    invitations: web::Data<dyn InvitationRepo>,
    songs: web::Data<dyn SongRepo>,
    options: web::Data<PageOptions>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();
    let invitation = invitations.fetch(&id).await?;
    store_suggestion(&invitation, &form, songs.get_ref()).await?;

    let skin = form.skin.as_deref().and_then(SkinId::lookup);
    let preview = options.allow_preview && form.preview.as_deref().map(is_flag).unwrap_or(false);

    Ok(HttpResponse::SeeOther()
        .insert_header((
            header::LOCATION,
            format!("{}#music", page_path(invitation.id(), skin, preview)),
        ))
        .finish())
}
