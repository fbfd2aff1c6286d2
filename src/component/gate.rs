use maud::{Markup, Render};

/// Outcome of passing content through a feature gate
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    Children(T),
    Fallback(T),
    Hidden,
}

impl<T> Gated<T> {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Gated::Hidden)
    }
}

/// Render `children` when visible, otherwise the fallback if there is one, otherwise nothing.
///
/// The gate never looks at the data behind a section: callers fold data presence into
/// `is_visible` themselves (`show_agenda && !agenda.is_empty()`).
/// `children` is only evaluated when the gate is open.
pub fn gate<T>(is_visible: bool, fallback: Option<T>, children: impl FnOnce() -> T) -> Gated<T> {
    if is_visible {
        Gated::Children(children())
    } else {
        match fallback {
            Some(fallback) => Gated::Fallback(fallback),
            None => Gated::Hidden,
        }
    }
}

impl Render for Gated<Markup> {
    fn render_to(&self, buffer: &mut String) {
        match self {
            Gated::Children(markup) | Gated::Fallback(markup) => markup.render_to(buffer),
            Gated::Hidden => {}
        }
    }
}
