mod email_address;
mod event_date;
mod guest_name;
mod skin_id;

pub use email_address::EmailAddress;
pub use event_date::EventDate;
pub use guest_name::GuestName;
pub use skin_id::SkinId;
