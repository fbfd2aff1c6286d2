//! HTML rendering of invitations with maud.
//!
//! Every skin shares the same section renderers; a skin only contributes its
//! presentation table ([`skin::Skin`]). Data flows down explicitly through a
//! [`RenderContext`], never through globals.

pub mod dispatcher;
pub mod layout;
pub mod sections;
pub mod skin;

use chrono::NaiveDateTime;

use crate::domain::SkinId;
use crate::model::{Invitation, SongSuggestion};

pub use dispatcher::{render_invitation, resolve_skin};

/// Path of an invitation page with the skin and preview choices in its query
pub fn page_path(id: &str, skin: Option<SkinId>, preview: bool) -> String {
    let mut query = Vec::new();
    if let Some(skin) = skin {
        query.push(format!("skin={}", skin));
    }
    if preview {
        query.push("preview=true".to_string());
    }

    let path = format!("/invitations/{}", id);
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

/// Read-only inputs of one page render
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub invitation: &'a Invitation,
    /// Disabled sections render an empty-state placeholder instead of nothing
    pub preview: bool,
    /// Local time the countdown is computed against
    pub now: NaiveDateTime,
    /// Gallery photo requested through the `photo` query parameter
    pub photo: usize,
    /// Skin chosen through the `skin` query parameter, carried into page links
    pub skin_override: Option<SkinId>,
    pub approved_songs: &'a [SongSuggestion],
}

impl<'a> RenderContext<'a> {
    pub fn new(invitation: &'a Invitation, now: NaiveDateTime) -> Self {
        Self {
            invitation,
            preview: false,
            now,
            photo: 0,
            skin_override: None,
            approved_songs: &[],
        }
    }

    /// Path of this invitation's page, keeping the skin and preview choices
    pub fn page_path(&self) -> String {
        page_path(self.invitation.id(), self.skin_override, self.preview)
    }

    /// Page path pointing at a given gallery photo
    pub fn photo_path(&self, photo: usize) -> String {
        let path = self.page_path();
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{}{}photo={}#gallery", path, separator, photo)
    }
}
