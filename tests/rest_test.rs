//! End-to-end tests over HTTP: a real server on a random port, driven with
//! reqwest.

use std::sync::Arc;

use serde_json::Value;
use taskd::{config::Config, rest, storage::Storage, tasks::TaskRepository, AppContext};
use tempfile::TempDir;

/// Spin up the task API on a random loopback port and return its base URL.
async fn spawn_server(dir: &TempDir) -> String {
    let data_dir = dir.path().to_path_buf();
    let config = Arc::new(Config::new(
        Some(0),
        Some(data_dir.clone()),
        Some("error".to_string()),
        None,
    ));
    let storage = Arc::new(Storage::new(&data_dir).await.unwrap());
    let tasks = Arc::new(TaskRepository::new(storage.clone()));
    let ctx = Arc::new(AppContext {
        config,
        storage,
        tasks,
    });

    let router = rest::build_router(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn full_task_lifecycle_over_http() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    // POST /Buy%20groceries → 201 with the created task.
    let resp = client
        .post(format!("{base}/Buy%20groceries"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let task: Value = resp.json().await.unwrap();
    assert_eq!(task["title"], "Buy groceries");
    let id = task["id"].as_i64().unwrap();
    chrono::NaiveDateTime::parse_from_str(task["created"].as_str().unwrap(), "%Y-%m-%d %H:%M")
        .expect("created should be YYYY-MM-DD HH:MM");

    // GET / → the list includes it.
    let listed: Value = client
        .get(format!("{base}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Buy groceries"));

    // PUT /{id}/Buy milk → 200 with the updated title.
    let resp = client
        .put(format!("{base}/{id}/Buy%20milk"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["title"], "Buy milk");

    // DELETE /{id} → 200, and the task is gone afterward.
    let resp = client.delete(format!("{base}/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client.get(format!("{base}/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.unwrap(), "\"\"");
}

#[tokio::test]
async fn plus_encoded_titles_are_decoded() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/Walk+the+dog"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let task: Value = resp.json().await.unwrap();
    assert_eq!(task["title"], "Walk the dog");
}

#[tokio::test]
async fn invalid_title_is_rejected_with_400() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let resp = client.post(format!("{base}/short")).send().await.unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.unwrap(), "\"\"");
}

#[tokio::test]
async fn unknown_method_is_405() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    let resp = client
        .patch(format!("{base}/Buy%20groceries"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn tasks_survive_across_connections() {
    let dir = TempDir::new().unwrap();
    let base = spawn_server(&dir).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/Water the plants"))
        .send()
        .await
        .unwrap();

    // A fresh client sees the same store.
    let other = reqwest::Client::new();
    let listed: Value = other
        .get(format!("{base}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
