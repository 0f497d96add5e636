use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_dir: std::path::PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let root = std::env::temp_dir().join(format!("card_e2e_{}", Uuid::new_v4()));
    let mut cfg = configs::AppConfig::default();
    cfg.storage.data_dir = root.join("data").to_string_lossy().into_owned();
    cfg.storage.frontend_dir = root.join("frontend").to_string_lossy().into_owned();

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir: root })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    let _ = tokio::fs::remove_dir_all(app.data_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_message_lifecycle_persists_to_file() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let url = format!("{}/api/messages", app.base_url);

    // Post
    let res = c.post(&url)
        .json(&json!({"name": "Sarah", "text": "Happy Birthday Richell! 🎂", "videos": ["https://youtu.be/abc"]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    // Edit
    let res = c.patch(format!("{url}/{id}")).json(&json!({"color": "bg-blue-100"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["color"], "bg-blue-100");

    // The file on disk is the source of truth
    let raw = tokio::fs::read_to_string(app.data_dir.join("data").join("messages.json")).await?;
    let on_disk: Vec<Value> = serde_json::from_str(&raw)?;
    assert_eq!(on_disk.len(), 1);
    assert_eq!(on_disk[0]["text"], "Happy Birthday Richell! 🎂");
    assert_eq!(on_disk[0]["color"], "bg-blue-100");

    // Delete
    let res = c.delete(format!("{url}/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let list = c.get(&url).send().await?.json::<Vec<Value>>().await?;
    assert!(list.is_empty());

    let _ = tokio::fs::remove_dir_all(app.data_dir).await;
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_allowed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/api/messages", app.base_url))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .send().await?;
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    let _ = tokio::fs::remove_dir_all(app.data_dir).await;
    Ok(())
}
