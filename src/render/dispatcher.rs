use maud::Markup;

use crate::component::RsvpForm;
use crate::domain::SkinId;
use crate::model::Invitation;
use crate::render::layout;
use crate::render::skin::skin;
use crate::render::RenderContext;

/// Pick the skin for a request.
///
/// A requested identifier wins over the one stored on the invitation. When
/// neither is present the configured default applies; an identifier that is
/// present but unknown falls back to the dark skin.
pub fn resolve_skin(requested: Option<&str>, invitation: &Invitation, default: SkinId) -> SkinId {
    let identifier = requested
        .filter(|id| !id.trim().is_empty())
        .or(invitation.metadata.skin_id.as_deref());

    match identifier {
        Some(_) => SkinId::from_identifier(identifier),
        None => default,
    }
}

/// Render an invitation in the given skin
#[tracing::instrument(name = "Render invitation", skip(ctx, form), fields(invitation_id = %ctx.invitation.id()))]
pub fn render_invitation(ctx: &RenderContext<'_>, skin_id: SkinId, form: &RsvpForm) -> Markup {
    layout::page(ctx, skin(skin_id), form)
}
