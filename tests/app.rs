use axum::Router;
use logbook::{
    app::AppState,
    auth::HeaderAuth,
    db, http,
    store::{LogStore, SqliteLogStore},
};
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

const HEADER: &str = "X-Token";
const TOKEN: &str = "test";

async fn start_server() -> (String, JoinHandle<()>) {
    let pool = db::connect("sqlite://:memory:", 1)
        .await
        .expect("connect memory sqlite");
    db::ensure_schema(&pool).await.expect("schema");
    let store: Arc<dyn LogStore> = Arc::new(SqliteLogStore::new(pool));
    let state = AppState {
        store,
        auth: HeaderAuth::new(HEADER, TOKEN),
        request_timeout: Duration::from_secs(5),
    };
    let app: Router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn write_read_count_round_trip() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/", base))
        .header(HEADER, TOKEN)
        .json(&json!({ "msgs": ["hola"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let v: serde_json::Value = res.json().await.unwrap();
    assert_eq!(v, json!({ "message": "message(s) successfully logged" }));

    let res = client
        .get(format!("{}/?n=1", base))
        .header(HEADER, TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let v: serde_json::Value = res.json().await.unwrap();
    assert_eq!(v, json!({ "logs": ["hola"] }));

    let res = client
        .get(format!("{}/count", base))
        .header(HEADER, TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let v: serde_json::Value = res.json().await.unwrap();
    assert_eq!(v, json!({ "count": 1 }));
}

#[tokio::test]
async fn batch_order_survives_both_read_directions() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/", base))
        .header(HEADER, TOKEN)
        .json(&json!({ "msgs": ["a", "b", "c"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    let all: serde_json::Value = client
        .get(format!("{}/", base))
        .header(HEADER, TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["logs"], json!(["a", "b", "c"]));

    let latest: serde_json::Value = client
        .get(format!("{}/?n=2", base))
        .header(HEADER, TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(latest["logs"], json!(["c", "b"]));
}

#[tokio::test]
async fn rejects_bad_write_bodies() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    for body in [json!({ "msgs": [] }), json!({}), json!({ "msgs": "nope" })] {
        let res = client
            .post(format!("{}/", base))
            .header(HEADER, TOKEN)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST, "{body}");
        let v: serde_json::Value = res.json().await.unwrap();
        assert!(v["error"].is_string());
    }

    let res = client
        .post(format!("{}/", base))
        .header(HEADER, TOKEN)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let count: serde_json::Value = client
        .get(format!("{}/count", base))
        .header(HEADER, TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count, json!({ "count": 0 }));
}

#[tokio::test]
async fn invalid_limit_is_a_client_error() {
    let (base, _srv) = start_server().await;
    let res = reqwest::Client::new()
        .get(format!("{}/?n=x", base))
        .header(HEADER, TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let v: serde_json::Value = res.json().await.unwrap();
    assert!(v["error"].as_str().unwrap().contains("invalid limit"));
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let (base, _srv) = start_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/", base))
        .json(&json!({ "msgs": ["sneaky"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client
        .get(format!("{}/count", base))
        .header(HEADER, "wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);

    let count: serde_json::Value = client
        .get(format!("{}/count", base))
        .header(HEADER, TOKEN)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count["count"], 0);
}
