use reqwest::{Method, StatusCode};

use invitations::controller::PageOptions;
use invitations::domain::SkinId;

use crate::helpers::{parse_time, TestApp, INVITATION_ID};

#[tokio::test]
async fn page_renders_for_known_invitation() {
    let app = TestApp::spawn().await;

    let res = app
        .page(INVITATION_ID, "")
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = res.text().await.unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Ana"));
    assert!(html.contains("Bruno"));
    assert!(html.contains(r#"id="rsvp""#));
}

#[tokio::test]
async fn unknown_invitation_is_not_found() {
    let app = TestApp::spawn().await;

    for path in ["invitations/nobody", "invitations/nobody/countdown"] {
        let res = app
            .request(Method::GET, path)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(res.status(), StatusCode::NOT_FOUND, "GET /{}", path);
    }
}

#[tokio::test]
async fn countdown_one_day_before_event() {
    let app = TestApp::spawn().await;

    let res = app
        .countdown(INVITATION_ID)
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["days"], 1);
    assert_eq!(body["hours"], 0);
    assert_eq!(body["minutes"], 0);
    assert_eq!(body["seconds"], 0);
    assert_eq!(body["expired"], false);

    let html = app.page_html("").await;
    assert!(html.contains(r#"data-unit="days">01<"#));
    assert!(html.contains(r#"data-unit="hours">00<"#));
}

#[tokio::test]
async fn countdown_freezes_at_zero_after_event() {
    let app = TestApp::spawn().await;
    app.clock.set(parse_time("2026-09-01T00:00:00"));

    let body: serde_json::Value = app
        .countdown(INVITATION_ID)
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(body["days"], 0);
    assert_eq!(body["seconds"], 0);
    assert_eq!(body["expired"], true);
}

#[tokio::test]
async fn countdown_stream_sends_events() {
    let app = TestApp::spawn().await;

    let mut res = app
        .request(
            Method::GET,
            &format!("invitations/{}/countdown/stream", INVITATION_ID),
        )
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/event-stream");

    let chunk = res
        .chunk()
        .await
        .expect("Failed to read stream")
        .expect("Stream ended early");
    let event = String::from_utf8_lossy(&chunk);

    assert!(event.starts_with("data: "));
    assert!(event.contains(r#""days":1"#));
}

#[tokio::test]
async fn gift_registry_is_absent_outside_preview() {
    let app = TestApp::spawn().await;

    let html = app.page_html("").await;

    assert!(!html.contains(r#"id="gift-registry""#));
    assert!(!html.contains(r#"data-empty="gift-registry""#));
    assert!(!html.contains("Honeymoon fund"));
}

#[tokio::test]
async fn preview_shows_placeholders_when_allowed() {
    let pages = PageOptions {
        allow_preview: true,
        ..PageOptions::default()
    };
    let app = TestApp::spawn_with(pages, None).await;

    let html = app.page_html("?preview=true").await;

    assert!(html.contains(r#"data-empty="gift-registry""#));
    assert!(!html.contains("Honeymoon fund"));
    // The RSVP form keeps the preview choice across its post
    assert!(html.contains(r#"name="preview" value="true""#));
}

#[tokio::test]
async fn preview_is_ignored_when_disallowed() {
    let app = TestApp::spawn().await;

    let html = app.page_html("?preview=true").await;

    assert!(!html.contains("data-empty"));
}

#[tokio::test]
async fn skin_query_selects_skin() {
    let app = TestApp::spawn().await;

    let html = app.page_html("?skin=cyberpunk-romance").await;
    assert!(html.contains(r#"data-skin="cyberpunk-romance""#));

    let html = app.page_html("?skin=nonexistent").await;
    assert!(html.contains(r#"data-skin="dark-bolt""#));
}

#[tokio::test]
async fn configured_default_skin_applies_without_identifier() {
    let pages = PageOptions {
        default_skin: SkinId::Japandi,
        ..PageOptions::default()
    };
    let app = TestApp::spawn_with(pages, None).await;

    let html = app.page_html("").await;
    assert!(html.contains(r#"data-skin="japandi""#));
}

#[tokio::test]
async fn photo_query_selects_gallery_slide() {
    let app = TestApp::spawn().await;

    let html = app.page_html("?photo=1").await;

    assert!(html.contains(r#"data-current="1""#));
    assert!(html.contains(r#"href="/invitations/ana-bruno?photo=0#gallery" data-carousel="next""#));
}

#[tokio::test]
async fn malformed_preview_and_photo_do_not_fail_the_page() {
    let app = TestApp::spawn().await;

    for query in ["?preview=1", "?photo=-1", "?photo=first&preview=nope"] {
        let res = app
            .page(INVITATION_ID, query)
            .await
            .expect("Failed to execute request");

        assert_eq!(res.status(), StatusCode::OK, "GET with {}", query);
    }

    let html = app.page_html("?photo=-1").await;
    assert!(html.contains(r#"data-current="0""#));
}
