use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Invitation;
use crate::telemetry::spawn_blocking_with_tracing;

/// Source of invitation documents.
/// NOTE: Invitations are authored upstream; this service only reads them.
#[async_trait::async_trait]
pub trait InvitationRepo: Send + Sync {
    /// Fetch a single invitation by its public id
    async fn fetch(&self, id: &str) -> Result<Invitation>;
}

/// Invitations stored as `<id>.json` files in one directory
#[derive(Debug, Clone)]
pub struct FileInvitationRepo {
    dir: PathBuf,
}

impl FileInvitationRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait::async_trait]
impl InvitationRepo for FileInvitationRepo {
    #[tracing::instrument(name = "Load invitation from file", skip(self))]
    async fn fetch(&self, id: &str) -> Result<Invitation> {
        if !is_valid_id(id) {
            return Err(Error::NotFound(id.to_string()));
        }

        let path = self.dir.join(format!("{}.json", id));
        let contents = spawn_blocking_with_tracing(move || std::fs::read_to_string(path))
            .await
            .map_err(|e| Error::Io(std::io::Error::new(ErrorKind::Other, e)))?;

        let contents = match contents {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let invitation: Invitation = serde_json::from_str(&contents)?;
        if invitation.id() != id {
            tracing::warn!(
                "Invitation file '{}' declares a different id '{}'",
                id,
                invitation.id()
            );
        }
        Ok(invitation)
    }
}

/// Invitations held in memory, keyed by id
#[derive(Debug, Default, Clone)]
pub struct InMemoryInvitationRepo {
    invitations: HashMap<String, Invitation>,
}

impl InMemoryInvitationRepo {
    pub fn new(invitations: impl IntoIterator<Item = Invitation>) -> Self {
        let invitations = invitations
            .into_iter()
            .map(|invitation| (invitation.id().to_string(), invitation))
            .collect();
        Self { invitations }
    }
}

#[async_trait::async_trait]
impl InvitationRepo for InMemoryInvitationRepo {
    async fn fetch(&self, id: &str) -> Result<Invitation> {
        self.invitations
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

/// Ids double as file names, so only plain slugs are accepted
fn is_valid_id(id: &str) -> bool {
    lazy_static::lazy_static! {
        static ref ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap();
    }
    ID_REGEX.is_match(id)
}
