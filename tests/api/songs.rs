use reqwest::{header, Method, StatusCode};

use invitations::controller::PageOptions;
use invitations::model::SongStatus;

use crate::helpers::{SongBody, TestApp, INVITATION_ID};

fn song(title: &str) -> SongBody {
    SongBody {
        guest_name: "Carla Dias".into(),
        song_title: title.into(),
        artist: "Earth, Wind & Fire".into(),
    }
}

#[tokio::test]
async fn suggestion_is_listed_only_once_approved() {
    let app = TestApp::spawn().await;

    let res = app
        .suggest_song(INVITATION_ID, &song("September"))
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::CREATED);

    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().parse().unwrap();

    let listed: Vec<serde_json::Value> = app
        .songs(INVITATION_ID)
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
    assert!(!app.page_html("").await.contains("September"));

    assert!(app.songs.set_status(id, SongStatus::Approved));

    let listed: Vec<serde_json::Value> = app
        .songs(INVITATION_ID)
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["song_title"], "September");
    assert!(app.page_html("").await.contains("September"));
}

#[tokio::test]
async fn form_suggestion_redirects_back_to_page() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, &format!("invitations/{}/songs", INVITATION_ID))
        .form(&song("Dancing Queen"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()[header::LOCATION],
        format!("/invitations/{}#music", INVITATION_ID).as_str()
    );
}

#[tokio::test]
async fn form_suggestion_redirect_keeps_skin_and_preview() {
    let pages = PageOptions {
        allow_preview: true,
        ..PageOptions::default()
    };
    let app = TestApp::spawn_with(pages, None).await;

    let html = app.page_html("?skin=retro&preview=true").await;
    let music = &html[html.find(r#"id="music""#).expect("No music section")..];
    let song_form = &music[..music.find("</form>").expect("No song form")];
    assert!(song_form.contains(r#"name="skin" value="retro""#));
    assert!(song_form.contains(r#"name="preview" value="true""#));

    let res = app
        .request(Method::POST, &format!("invitations/{}/songs", INVITATION_ID))
        .form(&[
            ("guest_name", "Carla Dias"),
            ("song_title", "Dancing Queen"),
            ("artist", "ABBA"),
            ("skin", "retro"),
            ("preview", "true"),
        ])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()[header::LOCATION],
        format!("/invitations/{}?skin=retro&preview=true#music", INVITATION_ID).as_str()
    );
}

#[tokio::test]
async fn blank_suggestion_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .suggest_song(INVITATION_ID, &song("  "))
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn suggestions_for_unknown_invitation_are_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .suggest_song("nobody", &song("September"))
        .await
        .expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.songs("nobody").await.expect("Failed to execute request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
