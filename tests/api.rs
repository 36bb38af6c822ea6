//! End-to-end tests driving the HTTP API over a real socket.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde_json::{Value, json};

use giveaway_ledger::api;
use giveaway_ledger::app_state::AppState;
use giveaway_ledger::config::LedgerConfig;

const TOKEN: &str = "integration-secret";

fn config(data_file: Option<&Path>) -> LedgerConfig {
    let data_file = data_file.map(|p| p.display().to_string());
    let result = LedgerConfig::from_lookup(|key| match key {
        "OPERATOR_TOKEN" => Some(TOKEN.to_string()),
        "RNG_SEED" => Some("7".to_string()),
        "PERSISTENCE_ENABLED" => Some(data_file.is_some().to_string()),
        "LEDGER_DATA_FILE" => data_file.clone(),
        _ => None,
    });
    let Ok(config) = result else {
        panic!("config failed");
    };
    config
}

async fn spawn_app(config: &LedgerConfig) -> String {
    let app = api::build_app(AppState::from_config(config), Duration::from_secs(5));
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });
    format!("http://{addr}")
}

struct Client {
    base: String,
    http: reqwest::Client,
}

impl Client {
    async fn start() -> Self {
        Self::at(spawn_app(&config(None)).await)
    }

    fn at(base: String) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> (u16, Value) {
        let Ok(response) = request.send().await else {
            panic!("request failed");
        };
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    async fn get(&self, path: &str, ip: &str) -> (u16, Value) {
        let url = format!("{}{path}", self.base);
        self.send(self.http.get(url).header("x-forwarded-for", ip)).await
    }

    async fn post(&self, path: &str, ip: &str, body: Value) -> (u16, Value) {
        let url = format!("{}{path}", self.base);
        self.send(self.http.post(url).header("x-forwarded-for", ip).json(&body))
            .await
    }

    async fn delete(&self, path: &str, body: Value) -> (u16, Value) {
        let url = format!("{}{path}", self.base);
        self.send(self.http.delete(url).json(&body)).await
    }

    async fn create_giveaway(&self) -> (String, String) {
        let (status, body) = self
            .post(
                "/api/giveaways",
                "10.0.0.100",
                json!({
                    "title": "Launch week",
                    "hostName": "Host",
                    "channelUrl": "https://t.me/host",
                    "endDate": "2030-01-01T12:00:00Z",
                }),
            )
            .await;
        assert_eq!(status, 201, "{body}");
        let (Some(id), Some(creator)) = (body["id"].as_str(), body["creatorId"].as_str()) else {
            panic!("missing ids in {body}");
        };
        (id.to_string(), creator.to_string())
    }

    async fn join(&self, id: &str, name: &str, ip: &str) -> (u16, Value) {
        self.post(&format!("/api/giveaways/{id}/join"), ip, json!({ "name": name }))
            .await
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let client = Client::start().await;
    let (status, body) = client.get("/api/health", "10.0.0.1").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn create_returns_creator_id_only_once() {
    let client = Client::start().await;
    let (id, _) = client.create_giveaway().await;

    let (status, body) = client.get(&format!("/api/giveaways/{id}"), "10.0.0.1").await;
    assert_eq!(status, 200);
    assert_eq!(body["isActive"], true);
    assert!(body.get("creatorId").is_none());

    let (status, list) = client.get("/api/giveaways", "10.0.0.1").await;
    assert_eq!(status, 200);
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert!(list[0].get("creatorId").is_none());
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let client = Client::start().await;
    let no_date = json!({ "title": "No date", "hostName": "H", "channelUrl": "c" });
    let (status, body) = client.post("/api/giveaways", "10.0.0.1", no_date).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], 1001);

    let no_title = json!({ "hostName": "H", "channelUrl": "c", "endDate": "2030-01-01T00:00:00Z" });
    let (status, _) = client.post("/api/giveaways", "10.0.0.1", no_title).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn second_join_from_same_address_is_rejected() {
    let client = Client::start().await;
    let (id, _) = client.create_giveaway().await;

    let (status, alice) = client.join(&id, "Alice", "10.0.0.1").await;
    assert_eq!(status, 200);
    assert_eq!(alice["referrals"], 0);
    assert!(alice.get("ip").is_none());
    assert!(alice["avatar"].as_str().is_some_and(|a| !a.is_empty()));

    let (status, body) = client.join(&id, "Bob", "10.0.0.1").await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], 2201);

    let (_, giveaway) = client.get(&format!("/api/giveaways/{id}"), "10.0.0.9").await;
    assert_eq!(giveaway["participants"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn join_unknown_giveaway_is_not_found() {
    let client = Client::start().await;
    let path = format!("/api/giveaways/{}/join", uuid::Uuid::new_v4());
    let (status, _) = client.post(&path, "10.0.0.1", json!({ "name": "Alice" })).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn referral_counts_once_per_clicking_address() {
    let client = Client::start().await;
    let (id, _) = client.create_giveaway().await;
    let (_, bea) = client.join(&id, "Bea", "10.0.0.2").await;
    let referral_path = format!("/api/giveaways/{id}/referral");

    let (status, click) = client
        .post(&referral_path, "10.0.0.3", json!({ "referrerId": bea["id"] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(click["referrerId"], bea["id"]);
    assert_eq!(click["isValid"], true);
    assert!(click.get("clickerIp").is_none());

    let (status, body) = client
        .post(&referral_path, "10.0.0.3", json!({ "referrerId": bea["id"] }))
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], 2202);

    let (status, board) = client
        .get(&format!("/api/giveaways/{id}/leaderboard"), "10.0.0.3")
        .await;
    assert_eq!(status, 200);
    assert_eq!(board[0]["name"], "Bea");
    assert_eq!(board[0]["referrals"], 1);
}

#[tokio::test]
async fn malformed_referrer_is_recorded_without_credit() {
    let client = Client::start().await;
    let (id, _) = client.create_giveaway().await;
    let (_, bea) = client.join(&id, "Bea", "10.0.0.2").await;
    let referral_path = format!("/api/giveaways/{id}/referral");

    let (status, click) = client
        .post(&referral_path, "10.0.0.3", json!({ "referrerId": "k3j9x0abc" }))
        .await;
    assert_eq!(status, 200, "{click}");
    assert_eq!(click["referrerId"], "k3j9x0abc");

    let (status, _) = client
        .post(&referral_path, "10.0.0.3", json!({ "referrerId": bea["id"] }))
        .await;
    assert_eq!(status, 409);

    let (_, board) = client
        .get(&format!("/api/giveaways/{id}/leaderboard"), "10.0.0.3")
        .await;
    assert_eq!(board[0]["referrals"], 0);
}

#[tokio::test]
async fn referral_requires_referrer_id() {
    let client = Client::start().await;
    let (id, _) = client.create_giveaway().await;
    let (status, _) = client
        .post(&format!("/api/giveaways/{id}/referral"), "10.0.0.3", json!({}))
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn leaderboard_ranks_and_caps_at_ten() {
    let client = Client::start().await;
    let (id, _) = client.create_giveaway().await;
    let mut ids = Vec::new();
    for i in 0..12 {
        let (status, p) = client.join(&id, &format!("P{i}"), &format!("10.1.0.{i}")).await;
        assert_eq!(status, 200);
        ids.push(p["id"].clone());
    }
    for (referrer, clicker) in [(5, "10.2.0.1"), (5, "10.2.0.2"), (11, "10.2.0.3")] {
        let (status, _) = client
            .post(
                &format!("/api/giveaways/{id}/referral"),
                clicker,
                json!({ "referrerId": ids[referrer] }),
            )
            .await;
        assert_eq!(status, 200);
    }

    let (_, board) = client
        .get(&format!("/api/giveaways/{id}/leaderboard"), "10.0.0.1")
        .await;
    let Some(board) = board.as_array() else {
        panic!("leaderboard is not an array");
    };
    assert_eq!(board.len(), 10);
    assert_eq!(board[0]["name"], "P5");
    assert_eq!(board[1]["name"], "P11");
    assert_eq!(board[2]["name"], "P0");
}

#[tokio::test]
async fn end_draws_winner_once() {
    let client = Client::start().await;
    let (id, _) = client.create_giveaway().await;
    let end_path = format!("/api/giveaways/{id}/end");

    let (status, body) = client.post(&end_path, "10.0.0.1", json!({ "token": TOKEN })).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], 2102);

    let mut ids = Vec::new();
    for (name, ip) in [("A", "10.0.0.1"), ("B", "10.0.0.2"), ("C", "10.0.0.3")] {
        let (_, p) = client.join(&id, name, ip).await;
        ids.push(p["id"].clone());
    }

    let (status, _) = client.post(&end_path, "10.0.0.1", json!({ "token": "wrong" })).await;
    assert_eq!(status, 403);

    let (status, body) = client.post(&end_path, "10.0.0.1", json!({ "token": TOKEN })).await;
    assert_eq!(status, 200);
    assert!(ids.contains(&body["winner"]["id"]));

    let (_, giveaway) = client.get(&format!("/api/giveaways/{id}"), "10.0.0.1").await;
    assert_eq!(giveaway["isActive"], false);
    assert_eq!(giveaway["winner"]["id"], body["winner"]["id"]);

    let (status, body) = client.post(&end_path, "10.0.0.1", json!({ "token": TOKEN })).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], 2101);

    let (status, _) = client.join(&id, "Late", "10.0.0.4").await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn delete_requires_token_and_creator_and_cascades() {
    let client = Client::start().await;
    let (id, creator) = client.create_giveaway().await;
    let (_, bea) = client.join(&id, "Bea", "10.0.0.2").await;
    let (status, _) = client
        .post(
            &format!("/api/giveaways/{id}/referral"),
            "10.0.0.3",
            json!({ "referrerId": bea["id"] }),
        )
        .await;
    assert_eq!(status, 200);
    let path = format!("/api/giveaways/{id}");

    let (status, _) = client.delete(&path, json!({ "creatorId": creator, "token": "wrong" })).await;
    assert_eq!(status, 403);

    let (status, body) = client
        .delete(&path, json!({ "creatorId": uuid::Uuid::new_v4(), "token": TOKEN }))
        .await;
    assert_eq!(status, 403);
    assert_eq!(body["error"]["code"], 4002);

    let (status, _) = client.delete(&path, json!({ "creatorId": creator, "token": TOKEN })).await;
    assert_eq!(status, 204);

    let (status, _) = client.get(&format!("{path}/leaderboard"), "10.0.0.1").await;
    assert_eq!(status, 404);
    let (status, _) = client.delete(&path, json!({ "creatorId": creator, "token": TOKEN })).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn channel_status_is_per_address() {
    let client = Client::start().await;
    let (_, body) = client.get("/api/channel/status", "10.0.0.1").await;
    assert_eq!(body["hasJoined"], false);

    let (status, body) = client.post("/api/channel/join", "10.0.0.1", Value::Null).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let (_, body) = client.get("/api/channel/status", "10.0.0.1").await;
    assert_eq!(body["hasJoined"], true);
    let (_, body) = client.get("/api/channel/status", "10.0.0.2").await;
    assert_eq!(body["hasJoined"], false);
}

#[tokio::test]
async fn json_file_store_survives_restart() {
    let Ok(dir) = tempfile::tempdir() else {
        panic!("tempdir failed");
    };
    let data_file = dir.path().join("ledger.json");
    let config = config(Some(&data_file));

    let first = Client::at(spawn_app(&config).await);
    let (id, _) = first.create_giveaway().await;
    let (status, _) = first.join(&id, "Alice", "10.0.0.1").await;
    assert_eq!(status, 200);
    assert!(data_file.exists());

    let second = Client::at(spawn_app(&config).await);
    let (status, giveaway) = second.get(&format!("/api/giveaways/{id}"), "10.0.0.1").await;
    assert_eq!(status, 200);
    assert_eq!(giveaway["participants"][0]["name"], "Alice");

    let (status, _) = second.join(&id, "Alice again", "10.0.0.1").await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let client = Client::start().await;
    let (status, doc) = client.get("/api-docs/openapi.json", "10.0.0.1").await;
    assert_eq!(status, 200);
    assert!(doc["paths"].get("/api/giveaways/{id}/referral").is_some());
}
