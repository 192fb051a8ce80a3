use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    _child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests.
        // DATABASE_URL is stripped so the server runs on the in-memory
        // store; every test file gets its own server and its own store.
        let mut cmd = Command::new("target/debug/hierarchy-api");
        cmd.env("HIERARCHY_API_PORT", port.to_string())
            .env_remove("DATABASE_URL")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            _child: child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// POST /add with the given details; returns the raw response.
#[allow(dead_code)]
pub async fn add_employee(
    server: &TestServer,
    client: &reqwest::Client,
    name: &str,
    age: i32,
    address: &str,
    superior_id: Option<i64>,
) -> Result<reqwest::Response> {
    let mut body = json!({ "name": name, "age": age, "address": address });
    if let Some(superior_id) = superior_id {
        body["superior_id"] = json!(superior_id);
    }
    Ok(client
        .post(format!("{}/add", server.base_url))
        .json(&body)
        .send()
        .await?)
}

/// Resolve an employee id by exact name via the search endpoint. The add
/// endpoint only returns a message, so tests look ids up this way.
#[allow(dead_code)]
pub async fn id_for_name(
    server: &TestServer,
    client: &reqwest::Client,
    name: &str,
) -> Result<i64> {
    let matches: Vec<Value> = client
        .get(format!("{}/search/{}", server.base_url, name))
        .send()
        .await?
        .json()
        .await?;

    matches
        .iter()
        .find(|m| m.get("name").and_then(Value::as_str) == Some(name))
        .and_then(|m| m.get("id").and_then(Value::as_i64))
        .with_context(|| format!("no employee named {} found via search", name))
}
