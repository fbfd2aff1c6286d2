use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

use url::Url;

use crate::controller::PageOptions;
use crate::domain::SkinId;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    /// Without a database, RSVPs and song suggestions are kept in memory
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
    pub invitations: InvitationSettings,
    #[serde(default)]
    pub rsvp: RsvpSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        // Get the path to the settings directory
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }
    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            // Include the base settings
            .add_source(File::from(base_path.join("base")).required(true))
            // Include the runtime settings
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Override/include any settings from environment variables
            // NOTE: Should be used for any prod secrets. Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    host: String,
    name: String,
    username: String,
    password: Secret<String>,
    require_ssl: bool,
}

impl DatabaseSettings {
    /// The database connection options, without specifying the database name
    pub fn without_db(&self) -> PgConnectOptions {
        use secrecy::ExposeSecret;

        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .port(self.port)
            .host(&self.host)
            .ssl_mode(ssl_mode)
            .username(&self.username)
            .password(self.password.expose_secret())
    }
    /// The database connection options, with the database name
    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct InvitationSettings {
    data_dir: PathBuf,
    #[serde(default)]
    default_skin: Option<String>,
    #[serde(default)]
    allow_preview: bool,
}

impl InvitationSettings {
    /// Directory holding one `<id>.json` document per invitation
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
    /// The skin used when neither the request nor the invitation picks one
    pub fn default_skin(&self) -> SkinId {
        SkinId::from_identifier(self.default_skin.as_deref())
    }
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            allow_preview: self.allow_preview,
            default_skin: self.default_skin(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RsvpSettings {
    /// Remote RSVP action; RSVPs are recorded locally when unset
    #[serde(default)]
    action_url: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    timeout_milliseconds: u64,
}

impl Default for RsvpSettings {
    fn default() -> Self {
        Self {
            action_url: None,
            timeout_milliseconds: 10_000,
        }
    }
}

impl RsvpSettings {
    /// The remote RSVP action endpoint, if one is configured
    pub fn action_url(&self) -> anyhow::Result<Option<Url>> {
        self.action_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| Url::parse(url).context("Failed to parse RSVP action URL"))
            .transpose()
    }
    /// The remote RSVP action timeout duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}
