use serde::{Deserialize, Serialize};

use crate::domain::EventDate;

/// Root aggregate rendered by every skin.
/// Loaded once per request and never mutated while rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub metadata: Metadata,
    #[serde(default)]
    pub content: Content,
    pub logistics: Logistics,
    #[serde(default)]
    pub features: Features,
}

impl Invitation {
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn event_date(&self) -> EventDate {
        self.logistics.event_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    #[serde(default)]
    pub skin_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    pub couple: Couple,
    pub headline: Option<String>,
    pub quote: Option<Quote>,
    pub gallery_images: Vec<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Couple {
    pub partner_one: String,
    pub partner_two: String,
}

impl Couple {
    /// `Ana & Bruno`, or whichever single name is present
    pub fn display_names(&self, separator: &str) -> String {
        match (self.partner_one.trim(), self.partner_two.trim()) {
            ("", "") => String::new(),
            (one, "") => one.to_string(),
            ("", two) => two.to_string(),
            (one, two) => format!("{} {} {}", one, separator, two),
        }
    }

    pub fn initials(&self) -> String {
        [&self.partner_one, &self.partner_two]
            .iter()
            .filter_map(|name| name.trim().chars().next())
            .map(|c| c.to_uppercase().to_string())
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logistics {
    pub event_date: EventDate,
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub agenda: Vec<AgendaItem>,
    #[serde(default)]
    pub dress_code: Option<DressCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    Ceremony,
    Reception,
}

impl VenueKind {
    pub fn label(&self) -> &'static str {
        match self {
            VenueKind::Ceremony => "Ceremony",
            VenueKind::Reception => "Reception",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "type")]
    pub kind: VenueKind,
    /// Local `HH:MM` start time at this venue
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub map_url: Option<String>,
}

impl Venue {
    /// Address parts joined for display and map/calendar queries, skipping blanks
    pub fn full_address(&self) -> String {
        [&self.address, &self.city, &self.country]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaItem {
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DressCode {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    /// CSS colour values suggested to guests
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Section toggles and their per-section configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub show_countdown: bool,
    pub show_agenda: bool,
    pub show_venue_map: bool,
    pub show_dress_code: bool,
    pub show_gallery: bool,
    pub show_gift_registry: bool,
    pub show_rsvp: bool,
    pub show_music: bool,

    pub gift_registry: Option<GiftRegistryConfig>,
    pub rsvp: RsvpConfig,
    pub music: Option<MusicConfig>,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            show_countdown: true,
            show_agenda: true,
            show_venue_map: true,
            show_dress_code: false,
            show_gallery: false,
            show_gift_registry: false,
            show_rsvp: true,
            show_music: false,
            gift_registry: None,
            rsvp: RsvpConfig::default(),
            music: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftRegistryConfig {
    pub message: Option<String>,
    pub bank_details: Option<BankDetails>,
    pub links: Vec<RegistryLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDetails {
    pub holder: String,
    #[serde(default)]
    pub bank: Option<String>,
    pub account: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RsvpConfig {
    /// Free-form deadline shown above the form, e.g. `July 1st`
    pub deadline: Option<String>,
    pub message: Option<String>,
    /// Largest party size a single response may confirm, the guest included
    pub max_guests: u8,
    pub custom_questions: Vec<CustomQuestion>,
    pub allow_song_suggestions: bool,
}

impl Default for RsvpConfig {
    fn default() -> Self {
        Self {
            deadline: None,
            message: None,
            max_guests: 2,
            custom_questions: Vec::new(),
            allow_song_suggestions: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    YesNo,
    Choice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomQuestion {
    pub id: String,
    pub label: String,
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    pub track_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub autoplay: bool,
}
