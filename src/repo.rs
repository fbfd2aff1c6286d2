mod invitations;
mod rsvps;
mod songs;

pub use invitations::{FileInvitationRepo, InMemoryInvitationRepo, InvitationRepo};
pub use rsvps::{InMemoryRsvpRepo, PgRsvpRepo, RsvpRepo, StoredRsvp};
pub use songs::{InMemorySongRepo, PgSongRepo, SongRepo};
