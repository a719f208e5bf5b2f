use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use server::routes;
use server::startup::{build_cors, serve};
use server::state::AppState;

struct TestApp {
    base_url: String,
    // dropping the sender stops the server
    _shutdown: oneshot::Sender<()>,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = routes::build_router(AppState::in_memory(), build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async move {
            let _ = rx.await;
        };
        if let Err(e) = serve(listener, app, shutdown).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, _shutdown: tx })
}

async fn post_json(c: &reqwest::Client, url: String, body: &Value) -> anyhow::Result<Value> {
    let res = c.post(url).json(body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Value>().await?)
}

async fn get_json(c: &reqwest::Client, url: String) -> anyhow::Result<Value> {
    let res = c.get(url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn e2e_health_ok_regardless_of_state() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    assert_eq!(get_json(&c, app.url("/health")).await?, json!({"status": "ok"}));
    post_json(&c, app.url("/profile"), &json!({"user_id": "u1"})).await?;
    post_json(&c, app.url("/checkin"), &json!({"user_id": "u1"})).await?;
    assert_eq!(get_json(&c, app.url("/health")).await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_profile_saved_and_echoed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let p = json!({
        "user_id": "u1",
        "name": "Ana",
        "school": "NYU",
        "rent": 1450,
        "coffee_per_week": 3,
        "nested": {"a": [1, 2, null]}
    });

    assert_eq!(post_json(&c, app.url("/profile"), &p).await?, p);
    assert_eq!(get_json(&c, app.url("/profile/u1")).await?, p);
    Ok(())
}

#[tokio::test]
async fn e2e_profile_overwrite_not_merge() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let p = json!({"user_id": "u1", "name": "Ana", "rent": 1450});
    let q = json!({"user_id": "u1", "phone_provider": "Mint"});

    post_json(&c, app.url("/profile"), &p).await?;
    post_json(&c, app.url("/profile"), &q).await?;
    assert_eq!(get_json(&c, app.url("/profile/u1")).await?, q);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_profile_is_empty_object() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    assert_eq!(get_json(&c, app.url("/profile/unknown-user")).await?, json!({}));
    Ok(())
}

#[tokio::test]
async fn e2e_checkins_listed_in_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let c1 = json!({"user_id": "u2", "date": "2024-09-01", "coffee": 4.5, "cooking": true});
    let c2 = json!({"user_id": "u2", "date": "2024-09-02", "groceries": 32});
    let c3 = json!({"user_id": "u2", "date": "2024-09-03", "eating_out": 18});

    for checkin in [&c1, &c2, &c3] {
        assert_eq!(post_json(&c, app.url("/checkin"), checkin).await?, *checkin);
    }
    assert_eq!(get_json(&c, app.url("/checkin/u2")).await?, json!([c1, c2, c3]));
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_checkins_is_empty_list() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    assert_eq!(get_json(&c, app.url("/checkin/unknown-user")).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_missing_user_id_defaults_to_demo() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let p = json!({"name": "guest"});
    let ck = json!({"date": "2024-09-01", "other": 5});

    post_json(&c, app.url("/profile"), &p).await?;
    post_json(&c, app.url("/checkin"), &ck).await?;
    assert_eq!(get_json(&c, app.url("/profile/demo")).await?, p);
    assert_eq!(get_json(&c, app.url("/checkin/demo")).await?, json!([ck]));
    Ok(())
}

#[tokio::test]
async fn e2e_non_string_user_ids_keep_their_own_keys() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let guest = json!({"name": "guest"});
    let five = json!({"user_id": "5", "name": "five"});

    post_json(&c, app.url("/profile"), &guest).await?;
    post_json(&c, app.url("/profile"), &five).await?;
    post_json(&c, app.url("/profile"), &json!({"user_id": null, "x": 1})).await?;
    post_json(&c, app.url("/profile"), &json!({"user_id": 5, "x": 2})).await?;

    assert_eq!(get_json(&c, app.url("/profile/demo")).await?, guest);
    assert_eq!(get_json(&c, app.url("/profile/5")).await?, five);
    Ok(())
}

#[tokio::test]
async fn e2e_non_object_body_is_accepted() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let body = json!(["not", "an", "object"]);

    assert_eq!(post_json(&c, app.url("/checkin"), &body).await?, body);
    assert_eq!(get_json(&c, app.url("/checkin/demo")).await?, json!([body]));
    Ok(())
}

#[tokio::test]
async fn e2e_stores_are_independent() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    post_json(&c, app.url("/profile"), &json!({"user_id": "u3", "name": "Kai"})).await?;
    assert_eq!(get_json(&c, app.url("/checkin/u3")).await?, json!([]));

    post_json(&c, app.url("/checkin"), &json!({"user_id": "u4"})).await?;
    assert_eq!(get_json(&c, app.url("/profile/u4")).await?, json!({}));
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_json_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(app.url("/profile"))
        .header("content-type", "application/json")
        .body("{\"user_id\": ")
        .send()
        .await?;
    assert!(res.status().is_client_error());
    assert_eq!(get_json(&c, app.url("/profile/demo")).await?, json!({}));
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_checkins_all_retained() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut handles = Vec::new();
    for n in 0..20 {
        let c = c.clone();
        let url = app.url("/checkin");
        handles.push(tokio::spawn(async move {
            c.post(url).json(&json!({"user_id": "busy", "n": n})).send().await
        }));
    }
    for h in handles {
        assert_eq!(h.await??.status(), HttpStatusCode::OK);
    }

    let list = get_json(&c, app.url("/checkin/busy")).await?;
    assert_eq!(list.as_array().map(Vec::len), Some(20));
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_allows_any_origin() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .request(reqwest::Method::OPTIONS, app.url("/profile"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await?;
    assert!(res.status().is_success());
    let h = res.headers();
    assert_eq!(
        h.get("access-control-allow-origin").map(|v| v.as_bytes()),
        Some(&b"http://localhost:3000"[..])
    );
    assert_eq!(
        h.get("access-control-allow-credentials").map(|v| v.as_bytes()),
        Some(&b"true"[..])
    );
    Ok(())
}
