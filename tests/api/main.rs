mod health_check;
mod helpers;
mod invitations;
mod rsvps;
mod songs;
