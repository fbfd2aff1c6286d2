use std::sync::Mutex;

use sqlx::PgPool;

use uuid::Uuid;

use crate::error::Result;
use crate::model::NewRsvp;

/// RSVP repository trait, implemented for each storage backend.
/// NOTE: Intended to facilitate easier testing/mocking
#[async_trait::async_trait]
pub trait RsvpRepo: Send + Sync {
    /// Store an RSVP, returning its id.
    /// Inserting the same `request_id` twice returns the first row's id without a second row.
    async fn insert(&self, rsvp: &NewRsvp) -> Result<Uuid>;
}

/// Postgres RSVP repository
#[derive(Debug, Clone)]
pub struct PgRsvpRepo {
    pool: PgPool,
}

impl PgRsvpRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RsvpRepo for PgRsvpRepo {
    #[tracing::instrument(name = "Insert RSVP", skip(self, rsvp), fields(request_id = %rsvp.request_id))]
    async fn insert(&self, rsvp: &NewRsvp) -> Result<Uuid> {
        let custom_answers = serde_json::to_string(&rsvp.custom_answers)?;

        // The no-op update makes a replayed request return the existing row
        let id = sqlx::query_scalar::<_, Uuid>(
            "insert into rsvps(id, invitation_id, request_id, name, email, phone, attendance, \
             guests_count, dietary_restrictions, message, music_suggestion, custom_answers) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             on conflict (request_id) do update set request_id = excluded.request_id \
             returning id",
        )
        .bind(Uuid::new_v4())
        .bind(&rsvp.invitation_id)
        .bind(rsvp.request_id)
        .bind(rsvp.name.as_ref())
        .bind(rsvp.email.as_ref().map(|e| e.as_ref().to_string()))
        .bind(rsvp.phone.as_deref().unwrap_or_default())
        .bind(rsvp.attendance)
        .bind(rsvp.guests_count as i16)
        .bind(rsvp.dietary_restrictions.as_deref().unwrap_or_default())
        .bind(rsvp.message.as_deref().unwrap_or_default())
        .bind(&rsvp.music_suggestion)
        .bind(custom_answers)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

/// A stored RSVP as kept by [`InMemoryRsvpRepo`]
#[derive(Debug, Clone)]
pub struct StoredRsvp {
    pub id: Uuid,
    pub rsvp: NewRsvp,
}

/// RSVP storage for development and tests
#[derive(Debug, Default)]
pub struct InMemoryRsvpRepo {
    rows: Mutex<Vec<StoredRsvp>>,
}

impl InMemoryRsvpRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<StoredRsvp> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait::async_trait]
impl RsvpRepo for InMemoryRsvpRepo {
    async fn insert(&self, rsvp: &NewRsvp) -> Result<Uuid> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = rows
            .iter()
            .find(|row| row.rsvp.request_id == rsvp.request_id)
        {
            tracing::info!("Replayed RSVP request {}", rsvp.request_id);
            return Ok(existing.id);
        }

        let id = Uuid::new_v4();
        rows.push(StoredRsvp {
            id,
            rsvp: rsvp.clone(),
        });
        Ok(id)
    }
}
