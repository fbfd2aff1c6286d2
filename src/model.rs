mod invitation;
mod rsvp;
mod song;

pub use invitation::*;
pub use rsvp::{NewRsvp, RsvpSubmission, SubmitResponse};
pub use song::{NewSongSuggestion, SongStatus, SongSuggestion};
