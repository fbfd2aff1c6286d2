use std::sync::Mutex;

use chrono::{DateTime, Utc};

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::Result;
use crate::model::{NewSongSuggestion, SongStatus, SongSuggestion};

/// Song suggestion repository trait
#[async_trait::async_trait]
pub trait SongRepo: Send + Sync {
    /// Store a new suggestion as pending
    async fn insert(&self, suggestion: &NewSongSuggestion) -> Result<Uuid>;

    /// Approved suggestions for an invitation, oldest first
    async fn fetch_approved(&self, invitation_id: &str) -> Result<Vec<SongSuggestion>>;
}

/// Postgres song suggestion repository
#[derive(Debug, Clone)]
pub struct PgSongRepo {
    pool: PgPool,
}

impl PgSongRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SongRow {
    id: Uuid,
    invitation_id: String,
    guest_name: String,
    song_title: String,
    artist: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SongRow> for SongSuggestion {
    type Error = crate::error::Error;

    fn try_from(row: SongRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            invitation_id: row.invitation_id,
            guest_name: row.guest_name,
            song_title: row.song_title,
            artist: row.artist,
            status: row.status.try_into()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait::async_trait]
impl SongRepo for PgSongRepo {
    #[tracing::instrument(name = "Insert song suggestion", skip(self))]
    async fn insert(&self, suggestion: &NewSongSuggestion) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "insert into song_suggestions(id, invitation_id, guest_name, song_title, artist, status) \
             values ($1, $2, $3, $4, $5, $6) returning id",
        )
        .bind(Uuid::new_v4())
        .bind(&suggestion.invitation_id)
        .bind(suggestion.guest_name.as_ref())
        .bind(&suggestion.song_title)
        .bind(&suggestion.artist)
        .bind(SongStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetch approved song suggestions", skip(self))]
    async fn fetch_approved(&self, invitation_id: &str) -> Result<Vec<SongSuggestion>> {
        let rows = sqlx::query_as::<_, SongRow>(
            "select id, invitation_id, guest_name, song_title, artist, status, created_at \
             from song_suggestions where invitation_id=$1 and status=$2 order by created_at",
        )
        .bind(invitation_id)
        .bind(SongStatus::Approved.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut suggestions = Vec::with_capacity(rows.len());
        for row in rows {
            match SongSuggestion::try_from(row) {
                Ok(suggestion) => suggestions.push(suggestion),
                Err(error) => {
                    tracing::warn!(error.cause_chain = ?error, "Skipping an unreadable song suggestion")
                }
            }
        }
        Ok(suggestions)
    }
}

/// Song suggestion storage for development and tests
#[derive(Debug, Default)]
pub struct InMemorySongRepo {
    rows: Mutex<Vec<SongSuggestion>>,
}

impl InMemorySongRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moderate a suggestion. Returns false if the id is unknown.
    pub fn set_status(&self, id: Uuid, status: SongStatus) -> bool {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        match rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.status = status;
                true
            }
            None => false,
        }
    }
}

#[async_trait::async_trait]
impl SongRepo for InMemorySongRepo {
    async fn insert(&self, suggestion: &NewSongSuggestion) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows.push(SongSuggestion {
            id,
            invitation_id: suggestion.invitation_id.clone(),
            guest_name: suggestion.guest_name.as_ref().to_string(),
            song_title: suggestion.song_title.clone(),
            artist: suggestion.artist.clone(),
            status: SongStatus::Pending,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn fetch_approved(&self, invitation_id: &str) -> Result<Vec<SongSuggestion>> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        Ok(rows
            .iter()
            .filter(|row| row.invitation_id == invitation_id && row.status == SongStatus::Approved)
            .cloned()
            .collect())
    }
}
