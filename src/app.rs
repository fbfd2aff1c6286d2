use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::action::RsvpAction;
use crate::component::{Clock, RsvpSubmitter};
use crate::controller::{self, PageOptions};
use crate::repo::{InvitationRepo, RsvpRepo, SongRepo};

/// Everything the request handlers share
#[derive(Clone)]
pub struct Services {
    pub invitations: Arc<dyn InvitationRepo>,
    pub rsvps: Arc<dyn RsvpRepo>,
    pub songs: Arc<dyn SongRepo>,
    /// Where RSVP form posts are sent; the local RSVP action when `None`
    pub submitter: Option<Arc<dyn RsvpSubmitter>>,
    pub clock: Arc<dyn Clock>,
    pub pages: PageOptions,
}

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, services: Services) -> anyhow::Result<Server> {
    let action = RsvpAction::new(services.invitations.clone(), services.rsvps.clone());
    let submitter: Arc<dyn RsvpSubmitter> = match services.submitter {
        Some(submitter) => submitter,
        None => Arc::new(action.clone()),
    };

    // Wrap application data
    let invitations = web::Data::from(services.invitations);
    let songs = web::Data::from(services.songs);
    let clock = web::Data::from(services.clock);
    let submitter = web::Data::from(submitter);
    let action = web::Data::new(action);
    let pages = web::Data::new(services.pages);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(invitations.clone())
            .app_data(songs.clone())
            .app_data(clock.clone())
            .app_data(submitter.clone())
            .app_data(action.clone())
            .app_data(pages.clone())
            .service(health_check)
            .service(controller::pages())
            .service(controller::api())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
