mod rsvp_client;

pub use rsvp_client::RsvpClient;
