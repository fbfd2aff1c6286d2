//! UI behavior shared by every skin. Skins differ only in presentation.

pub mod carousel;
pub mod countdown;
pub mod gate;
pub mod links;
pub mod rsvp_form;

pub use carousel::Carousel;
pub use countdown::{Clock, CountdownTicker, FixedClock, LocalClock, Remaining};
pub use gate::{gate, Gated};
pub use rsvp_form::{FormState, RsvpFields, RsvpForm, RsvpSubmitter};
