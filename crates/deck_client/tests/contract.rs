use std::time::Duration;

use deck_client::{ApiClient, ClientSettings, PopulateRequest};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    }
}

#[tokio::test]
async fn health_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    assert!(client.health().await.unwrap());
}

#[tokio::test]
async fn api_key_header_is_attached_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists"))
        .and(header("x-api-key", "secret"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientSettings {
        base_url: server.uri(),
        api_key: Some("secret".to_owned()),
        ..ClientSettings::default()
    })
    .unwrap();

    assert!(client.list_lists().await.unwrap().is_empty());
}

#[tokio::test]
async fn lists_tolerate_missing_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "l1",
                "name": "Engineers",
                "search_url": "https://x/search?kw=eng",
                "profile_count": 14,
                "created_at": "2026-01-15T12:00:00Z"
            },
            { "id": "l2" }
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let lists = client.list_lists().await.unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].profile_count, 14);
    assert_eq!(lists[1].name, "");
    assert_eq!(lists[1].profile_count, 0);
    assert_eq!(lists[1].created_at, None);
}

#[tokio::test]
async fn single_list_fetch_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "l1",
            "name": "Engineers",
            "search_url": "https://x/search?kw=eng",
            "profile_count": 3
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let list = client.get_list("l1").await.unwrap();
    assert_eq!(list.name, "Engineers");
    assert_eq!(list.profile_count, 3);
}

#[tokio::test]
async fn populate_sends_the_documented_body() {
    let server = MockServer::start().await;
    // sender_rotation stays off the wire when the default is kept.
    Mock::given(method("POST"))
        .and(path("/lists/populate"))
        .and(body_json(json!({
            "search_url": "https://x/search?kw=eng",
            "profile_limit": 50,
            "collect_only": true,
            "send_note": false,
            "note_text": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let ack = client
        .populate_list(&PopulateRequest {
            search_url: "https://x/search?kw=eng".to_owned(),
            profile_limit: 50,
            collect_only: true,
            send_note: false,
            note_text: String::new(),
            sender_rotation: None,
        })
        .await
        .unwrap();
    assert!(ack.ok);
}

#[tokio::test]
async fn populate_can_request_one_sender_rotation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lists/populate"))
        .and(body_json(json!({
            "search_url": "https://x/search?kw=eng",
            "profile_limit": 20,
            "collect_only": false,
            "send_note": true,
            "note_text": "Hi!",
            "sender_rotation": "one_sender"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    client
        .populate_list(&PopulateRequest {
            search_url: "https://x/search?kw=eng".to_owned(),
            profile_limit: 20,
            collect_only: false,
            send_note: true,
            note_text: "Hi!".to_owned(),
            sender_rotation: Some("one_sender".to_owned()),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn toggle_sender_hits_the_toggle_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/senders/s1/toggle"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "s1", "enabled": true })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let toggled = client.toggle_sender("s1").await.unwrap();
    assert_eq!(toggled.id, "s1");
    assert!(toggled.enabled);
}

#[tokio::test]
async fn create_sender_omits_absent_storage_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/senders"))
        .and(body_json(json!({ "name": "Account A" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "s9", "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let ack = client.create_sender("Account A", None).await.unwrap();
    assert_eq!(ack.id, "s9");
    assert!(ack.ok);
}

#[tokio::test]
async fn update_sender_carries_the_storage_state_blob() {
    let server = MockServer::start().await;
    let blob = json!({ "cookies": [{ "name": "li_at", "value": "x" }] });
    Mock::given(method("PATCH"))
        .and(path("/senders/s1"))
        .and(body_json(json!({ "name": "Account A", "storage_state": blob })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "s1", "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    client
        .update_sender("s1", "Account A", Some(&blob))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_then_prospect_fetch_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/lists/l1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lists/l1/prospects"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "list not found" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    assert!(client.delete_list("l1").await.unwrap().ok);
    let err = client.list_prospects("l1").await.unwrap_err();
    assert_eq!(err.message, "list not found");
}

#[tokio::test]
async fn send_campaign_reports_outcome_counts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/campaigns/send"))
        .and(body_json(json!({ "limit": 25, "default_dm": "Hi {first_name}!" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "attempted": 25,
            "sent": 23,
            "errors": 2
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let outcome = client
        .send_campaign(Some(25), Some("Hi {first_name}!"))
        .await
        .unwrap();
    assert_eq!(outcome.attempted, 25);
    assert_eq!(outcome.sent, 23);
    assert_eq!(outcome.errors, 2);
}

#[tokio::test]
async fn verify_connections_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/connections/verify"))
        .and(body_json(json!({ "limit": 50 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "checked": 50,
            "connected": 12
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let outcome = client.verify_connections(Some(50)).await.unwrap();
    assert_eq!(outcome.checked, 50);
    assert_eq!(outcome.connected, 12);
}

#[tokio::test]
async fn concurrent_fetches_fail_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/senders"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "db down" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(settings(&server)).unwrap();
    let (lists, senders) = tokio::join!(client.list_lists(), client.list_senders());
    assert!(lists.unwrap().is_empty());
    assert_eq!(senders.unwrap_err().message, "db down");
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "ok": true })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    })
    .unwrap();

    let err = client.health().await.unwrap_err();
    assert_eq!(err.kind, deck_client::ApiErrorKind::Network);
}
