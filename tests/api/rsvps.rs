use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;

use serde_json::json;

use url::Url;

use uuid::Uuid;

use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use invitations::client::RsvpClient;
use invitations::component::rsvp_form::GENERIC_ERROR;
use invitations::controller::PageOptions;

use crate::helpers::{TestApp, INVITATION_ID};

fn submission(request_id: Uuid) -> serde_json::Value {
    json!({
        "invitationId": INVITATION_ID,
        "requestId": request_id,
        "name": "Carla Dias",
        "email": "carla@example.com",
        "attendance": true,
        "guestsCount": 2,
        "customAnswers": { "shuttle": "yes" }
    })
}

#[tokio::test]
async fn form_post_shows_confirmation_and_stores_rsvp() {
    let app = TestApp::spawn().await;

    let res = app
        .rsvp_form(
            INVITATION_ID,
            &[
                ("name", "Carla Dias"),
                ("attendance", "yes"),
                ("guests_count", "2"),
                ("custom_shuttle", "yes"),
            ],
        )
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains(r#"data-state="success""#));
    assert!(!html.contains(r#"value="Carla Dias""#));

    let stored = app.rsvps.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].rsvp.guests_count, 2);
    assert_eq!(stored[0].rsvp.custom_answers["shuttle"], "yes");
}

#[tokio::test]
async fn form_post_with_missing_attendance_keeps_fields() {
    let app = TestApp::spawn().await;

    let html = app
        .rsvp_form(
            INVITATION_ID,
            &[("name", "Carla Dias"), ("custom_shuttle", "no")],
        )
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();

    assert!(html.contains(r#"data-state="error""#));
    assert!(html.contains("Please let us know if you can attend"));
    assert!(html.contains(r#"value="Carla Dias""#));
    assert!(app.rsvps.all().is_empty());
}

#[tokio::test]
async fn form_post_rejected_by_action_shows_its_message() {
    let app = TestApp::spawn().await;

    let html = app
        .rsvp_form(
            INVITATION_ID,
            &[
                ("name", "Carla Dias"),
                ("attendance", "yes"),
                ("guests_count", "9"),
                ("custom_shuttle", "yes"),
            ],
        )
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();

    assert!(html.contains(r#"data-state="error""#));
    assert!(html.contains("At most 3 guests can be confirmed"));
    assert!(app.rsvps.all().is_empty());
}

#[tokio::test]
async fn form_post_to_unreachable_remote_action_shows_generic_error() {
    let action_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&action_server)
        .await;

    let action_url = Url::parse(&action_server.uri()).unwrap().join("rsvp").unwrap();
    let client = RsvpClient::new(action_url, Duration::from_secs(2)).unwrap();
    let app = TestApp::spawn_with(PageOptions::default(), Some(Arc::new(client))).await;

    let html = app
        .rsvp_form(
            INVITATION_ID,
            &[
                ("name", "Carla Dias"),
                ("attendance", "no"),
                ("custom_shuttle", "no"),
            ],
        )
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();

    assert!(html.contains(GENERIC_ERROR));
    assert!(html.contains(r#"value="Carla Dias""#));
}

#[tokio::test]
async fn api_records_valid_submission() {
    let app = TestApp::spawn().await;

    let res = app
        .rsvp_api(&submission(Uuid::new_v4()))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
    assert_eq!(app.rsvps.all().len(), 1);
}

#[tokio::test]
async fn api_rejects_invalid_submissions() {
    let app = TestApp::spawn().await;

    let mut too_many_guests = submission(Uuid::new_v4());
    too_many_guests["guestsCount"] = json!(5);
    let mut bad_email = submission(Uuid::new_v4());
    bad_email["email"] = json!("not an email");
    let mut unanswered = submission(Uuid::new_v4());
    unanswered["customAnswers"] = json!({});

    let test_cases = vec![
        ("too many guests", too_many_guests),
        ("malformed email", bad_email),
        ("required question unanswered", unanswered),
        ("missing name", json!({ "invitationId": INVITATION_ID, "attendance": true })),
    ];

    for (desc, body) in test_cases {
        let res = app
            .rsvp_api(&body)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "The API did not fail with 400 Bad Request when the payload was {}",
            desc
        );
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["success"], false, "{}", desc);
        assert!(body["error"].is_string(), "{}", desc);
    }

    assert!(app.rsvps.all().is_empty());
}

#[tokio::test]
async fn api_answers_not_found_for_unknown_invitation() {
    let app = TestApp::spawn().await;

    let mut body = submission(Uuid::new_v4());
    body["invitationId"] = json!("nobody");

    let res = app.rsvp_api(&body).await.expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn replayed_request_is_stored_once() {
    let app = TestApp::spawn().await;
    let body = submission(Uuid::new_v4());

    for _ in 0..2 {
        let res = app.rsvp_api(&body).await.expect("Failed to execute request");
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    assert_eq!(app.rsvps.all().len(), 1);
}
