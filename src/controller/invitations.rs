use std::collections::HashMap;

use actix_web::http::header;
use actix_web::web::Bytes;
use actix_web::{get, web, HttpResponse, Responder};

use maud::Markup;

use serde::{Deserialize, Serialize};

use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

use crate::component::{Clock, CountdownTicker, Remaining, RsvpForm};
use crate::domain::SkinId;
use crate::error::RestResult;
use crate::model::Invitation;
use crate::render::{render_invitation, resolve_skin, RenderContext};
use crate::repo::{InvitationRepo, SongRepo};

/// Page-level switches read from settings
#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    /// Whether `?preview=true` is honored at all
    pub allow_preview: bool,
    /// Skin used when neither the request nor the invitation names one
    pub default_skin: SkinId,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            allow_preview: false,
            default_skin: SkinId::default(),
        }
    }
}

/// Query parameters of an invitation page.
/// Malformed `preview` or `photo` values fall back to their defaults instead of failing the page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skin: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub preview: bool,
    #[serde(default, deserialize_with = "lenient_index")]
    pub photo: usize,
}

impl PageQuery {
    /// Page choices carried through a form post as hidden inputs
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        Self {
            skin: form.get("skin").cloned(),
            preview: form.get("preview").map(|v| is_flag(v)).unwrap_or(false),
            photo: 0,
        }
    }
}

pub(crate) fn is_flag(value: &str) -> bool {
    matches!(value, "true" | "1" | "yes" | "on")
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(is_flag(&value))
}

fn lenient_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.parse().unwrap_or_default())
}

/// Render the page for `invitation` with the given RSVP form state
pub(crate) async fn render_page(
    invitation: &Invitation,
    query: &PageQuery,
    form: &RsvpForm,
    songs: &dyn SongRepo,
    clock: &dyn Clock,
    options: &PageOptions,
) -> RestResult<Markup> {
    let approved_songs = if invitation.features.rsvp.allow_song_suggestions {
        songs.fetch_approved(invitation.id()).await?
    } else {
        Vec::new()
    };

    if query.preview && !options.allow_preview {
        tracing::debug!("Ignoring preview request, preview is disabled");
    }

    let skin_id = resolve_skin(query.skin.as_deref(), invitation, options.default_skin);
    let ctx = RenderContext {
        invitation,
        preview: query.preview && options.allow_preview,
        now: clock.now(),
        photo: query.photo,
        skin_override: query.skin.as_deref().and_then(SkinId::lookup),
        approved_songs: &approved_songs,
    };

    Ok(render_invitation(&ctx, skin_id, form))
}

#[tracing::instrument(name = "Show an invitation", skip(invitations, songs, clock, options))]
#[get("/{id}")]
pub(crate) async fn show(
    path: web::Path<(String,)>,
    query: web::Query<PageQuery>,
    invitations: web::Data<dyn InvitationRepo>,
    songs: web::Data<dyn SongRepo>,
    clock: web::Data<dyn Clock>,
    options: web::Data<PageOptions>,
) -> RestResult<Markup> {
    let (id,) = path.into_inner();
    let invitation = invitations.fetch(&id).await?;
    let form = RsvpForm::new(&invitation);

    render_page(
        &invitation,
        &query,
        &form,
        songs.get_ref(),
        clock.get_ref(),
        options.get_ref(),
    )
    .await
}

#[derive(Debug, Serialize)]
struct CountdownBody {
    #[serde(flatten)]
    remaining: Remaining,
    expired: bool,
}

impl From<Remaining> for CountdownBody {
    fn from(remaining: Remaining) -> Self {
        Self {
            remaining,
            expired: remaining.is_expired(),
        }
    }
}

#[tracing::instrument(name = "Get the countdown of an invitation", skip(invitations, clock))]
#[get("/{id}/countdown")]
pub(crate) async fn countdown(
    path: web::Path<(String,)>,
    invitations: web::Data<dyn InvitationRepo>,
    clock: web::Data<dyn Clock>,
) -> RestResult<impl Responder> {
    let (id,) = path.into_inner();
    let invitation = invitations.fetch(&id).await?;
    let remaining = Remaining::between(invitation.event_date().as_naive(), clock.now());

    Ok(HttpResponse::Ok().json(CountdownBody::from(remaining)))
}

/// One `data:` event per second until the event starts. The ticker belongs to
/// the response stream and is aborted when the client goes away.
#[tracing::instrument(name = "Stream the countdown of an invitation", skip(invitations, clock))]
#[get("/{id}/countdown/stream")]
pub(crate) async fn countdown_stream(
    path: web::Path<(String,)>,
    invitations: web::Data<dyn InvitationRepo>,
    clock: web::Data<dyn Clock>,
) -> RestResult<HttpResponse> {
    let (id,) = path.into_inner();
    let invitation = invitations.fetch(&id).await?;

    let ticker = CountdownTicker::spawn(invitation.event_date().as_naive(), clock.into_inner());
    let events = WatchStream::new(ticker.subscribe()).map(move |remaining| {
        let _ticker = &ticker;
        serde_json::to_string(&CountdownBody::from(remaining))
            .map(|data| Bytes::from(format!("data: {}\n\n", data)))
    });

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(events))
}
