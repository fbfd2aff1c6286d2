use std::net::TcpListener;
use std::sync::Arc;

use chrono::NaiveDateTime;

use reqwest::redirect::Policy;
use reqwest::{Client, Method, Response};

use serde::Serialize;

use invitations::app::{self, Services};
use invitations::component::{FixedClock, RsvpSubmitter};
use invitations::controller::PageOptions;
use invitations::model::Invitation;
use invitations::repo::{InMemoryInvitationRepo, InMemoryRsvpRepo, InMemorySongRepo};

pub const INVITATION_ID: &str = "ana-bruno";

/// Exactly one day before the fixture's event date
pub const NOW: &str = "2026-08-21T18:00:00";

pub fn fixture() -> Invitation {
    serde_json::from_str(
        r#"{
            "metadata": { "id": "ana-bruno", "title": "Ana & Bruno" },
            "content": {
                "couple": { "partner_one": "Ana", "partner_two": "Bruno" },
                "gallery_images": [
                    "https://example.com/one.jpg",
                    "https://example.com/two.jpg"
                ]
            },
            "logistics": {
                "event_date": "2026-08-22T18:00:00",
                "venues": [
                    { "name": "Capela", "type": "ceremony", "time": "16:00", "city": "Sintra" }
                ],
                "agenda": [ { "time": "16:00", "title": "Ceremony" } ]
            },
            "features": {
                "show_gallery": true,
                "show_gift_registry": false,
                "show_music": true,
                "gift_registry": { "message": "Honeymoon fund" },
                "rsvp": {
                    "max_guests": 3,
                    "custom_questions": [
                        { "id": "shuttle", "label": "Shuttle?", "kind": "yes_no", "required": true }
                    ],
                    "allow_song_suggestions": true
                }
            }
        }"#,
    )
    .expect("Failed to parse fixture invitation")
}

pub fn parse_time(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("Failed to parse time")
}

#[derive(Debug, Serialize)]
pub struct SongBody {
    pub guest_name: String,
    pub song_title: String,
    pub artist: String,
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub clock: FixedClock,
    pub rsvps: Arc<InMemoryRsvpRepo>,
    pub songs: Arc<InMemorySongRepo>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(PageOptions::default(), None).await
    }

    pub async fn spawn_with(
        pages: PageOptions,
        submitter: Option<Arc<dyn RsvpSubmitter>>,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let clock = FixedClock::new(parse_time(NOW));
        let rsvps = Arc::new(InMemoryRsvpRepo::new());
        let songs = Arc::new(InMemorySongRepo::new());

        let services = Services {
            invitations: Arc::new(InMemoryInvitationRepo::new([fixture()])),
            rsvps: rsvps.clone(),
            songs: songs.clone(),
            submitter,
            clock: Arc::new(clock.clone()),
            pages,
        };

        let server = app::run(listener, services).expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to build http client");

        Self {
            addr,
            client,
            clock,
            rsvps,
            songs,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn page(&self, id: &str, query: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("invitations/{}{}", id, query))
            .send()
            .await
    }

    pub async fn page_html(&self, query: &str) -> String {
        self.page(INVITATION_ID, query)
            .await
            .expect("Failed to execute request")
            .text()
            .await
            .expect("Failed to read page")
    }

    pub async fn countdown(&self, id: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("invitations/{}/countdown", id))
            .send()
            .await
    }

    pub async fn rsvp_form(&self, id: &str, fields: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.request(Method::POST, &format!("invitations/{}/rsvp", id))
            .form(fields)
            .send()
            .await
    }

    pub async fn rsvp_api(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/rsvp")
            .json(body)
            .send()
            .await
    }

    pub async fn songs(&self, id: &str) -> reqwest::Result<Response> {
        self.request(Method::GET, &format!("api/invitations/{}/songs", id))
            .send()
            .await
    }

    pub async fn suggest_song(&self, id: &str, body: &SongBody) -> reqwest::Result<Response> {
        self.request(Method::POST, &format!("api/invitations/{}/songs", id))
            .json(body)
            .send()
            .await
    }
}
