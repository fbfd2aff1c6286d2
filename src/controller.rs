use actix_web::dev::HttpServiceFactory;
use actix_web::{error, web, HttpResponse};

use crate::model::SubmitResponse;

pub mod invitations;
pub mod rsvps;
pub mod songs;

pub use invitations::{PageOptions, PageQuery};

/// Guest-facing HTML pages and their form posts
pub fn pages() -> impl HttpServiceFactory {
    web::scope("/invitations")
        .service(invitations::show)
        .service(invitations::countdown)
        .service(invitations::countdown_stream)
        .service(rsvps::submit_form)
        .service(songs::suggest_form)
}

/// JSON endpoints: the RSVP action and song suggestions
pub fn api() -> impl HttpServiceFactory {
    // Malformed bodies still answer in the `{success, error}` shape
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(SubmitResponse::failed(err.to_string()));
        error::InternalError::from_response(err, response).into()
    });

    web::scope("/api")
        .app_data(json_config)
        .service(rsvps::record)
        .service(songs::list)
        .service(songs::suggest)
}
