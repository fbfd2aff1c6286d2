use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::domain::GuestName;
use crate::error::{Error, Result};

const MAX_FIELD_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongStatus {
    Pending,
    Approved,
    Rejected,
}

impl SongStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongStatus::Pending => "pending",
            SongStatus::Approved => "approved",
            SongStatus::Rejected => "rejected",
        }
    }
}

impl TryFrom<String> for SongStatus {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        match s.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::ParsingError(format!(
                "{} is not a valid song status",
                other
            ))),
        }
    }
}

/// Stored song suggestion
#[derive(Debug, Clone, Serialize)]
pub struct SongSuggestion {
    pub id: Uuid,
    #[serde(skip)]
    pub invitation_id: String,
    pub guest_name: String,
    pub song_title: String,
    pub artist: String,
    pub status: SongStatus,
    pub created_at: DateTime<Utc>,
}

/// A validated song suggestion, always stored as pending
#[derive(Debug, Clone)]
pub struct NewSongSuggestion {
    pub invitation_id: String,
    pub guest_name: GuestName,
    pub song_title: String,
    pub artist: String,
}

impl NewSongSuggestion {
    pub fn parse(
        invitation_id: &str,
        guest_name: &str,
        song_title: &str,
        artist: &str,
    ) -> Result<Self> {
        Ok(Self {
            invitation_id: invitation_id.to_string(),
            guest_name: guest_name.parse()?,
            song_title: required_field("Song title", song_title)?,
            artist: required_field("Artist", artist)?,
        })
    }
}

fn required_field(label: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::ParsingError(format!("{} cannot be empty", label)));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(Error::ParsingError(format!("{} too long", label)));
    }
    Ok(value.to_string())
}
