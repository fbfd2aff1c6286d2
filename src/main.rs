use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use sqlx::postgres::PgPoolOptions;

use invitations::app::{self, Services};
use invitations::client::RsvpClient;
use invitations::component::{LocalClock, RsvpSubmitter};
use invitations::repo::{
    FileInvitationRepo, InMemoryRsvpRepo, InMemorySongRepo, PgRsvpRepo, PgSongRepo, RsvpRepo,
    SongRepo,
};
use invitations::settings::Settings;
use invitations::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info".into(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load()?;

    let (rsvps, songs): (Arc<dyn RsvpRepo>, Arc<dyn SongRepo>) = match &settings.database {
        Some(database) => {
            let pool = PgPoolOptions::new().connect_lazy_with(database.with_db());
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            (
                Arc::new(PgRsvpRepo::new(pool.clone())),
                Arc::new(PgSongRepo::new(pool)),
            )
        }
        None => {
            tracing::warn!("No database configured, RSVPs and songs are kept in memory");
            (
                Arc::new(InMemoryRsvpRepo::new()),
                Arc::new(InMemorySongRepo::new()),
            )
        }
    };

    let submitter = match settings.rsvp.action_url()? {
        Some(action_url) => {
            tracing::info!("Sending RSVPs to {}", action_url);
            let client = RsvpClient::new(action_url, settings.rsvp.timeout())?;
            Some(Arc::new(client) as Arc<dyn RsvpSubmitter>)
        }
        None => None,
    };

    let services = Services {
        invitations: Arc::new(FileInvitationRepo::new(settings.invitations.data_dir())),
        rsvps,
        songs,
        submitter,
        clock: Arc::new(LocalClock),
        pages: settings.invitations.page_options(),
    };

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, services)?
        .await
        .context("Failed to run app")
}
