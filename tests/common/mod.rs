//! Mock Hetzner Cloud API for integration tests.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// A request the mock received.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub name: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockState {
    pub servers: Vec<Value>,
    pub load_balancers: Vec<Value>,
    /// Status returned by `GET /load_balancers/{id}` instead of the resource.
    pub fail_load_balancer_by_id: Option<u16>,
    pub requests: Vec<Recorded>,
}

impl MockState {
    pub fn with_server(mut self, id: u64, name: &str) -> Self {
        self.servers.push(json!({
            "id": id,
            "name": name,
            "status": "running",
            "public_net": { "ipv4": { "ip": format!("203.0.113.{}", id) } },
            "private_net": [{ "network": 1, "ip": format!("10.0.0.{}", id) }]
        }));
        self
    }

    pub fn with_load_balancer(mut self, id: u64, name: &str) -> Self {
        self.load_balancers.push(json!({
            "id": id,
            "name": name,
            "algorithm": { "type": "round_robin" },
            "targets": []
        }));
        self
    }
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub endpoint: String,
    state: Shared,
}

impl MockApi {
    /// Serve `state` on an ephemeral local port.
    pub async fn start(state: MockState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/v1/servers", get(list_servers))
            .route("/v1/load_balancers", get(list_load_balancers))
            .route("/v1/load_balancers/{id}", get(get_load_balancer))
            .route("/v1/load_balancers/{id}/actions/{action}", post(target_action))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            endpoint: format!("http://{}/v1", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Bodies of every POST to `/actions/{action}`.
    pub fn actions(&self, action: &str) -> Vec<(String, Value)> {
        let suffix = format!("/actions/{}", action);
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST" && r.path.ends_with(&suffix))
            .map(|r| (r.path, r.body.unwrap_or(Value::Null)))
            .collect()
    }

    /// Targets currently registered on load balancer `id`.
    pub fn targets(&self, id: u64) -> Vec<Value> {
        let state = self.state.lock().unwrap();
        state
            .load_balancers
            .iter()
            .find(|lb| lb["id"] == id)
            .and_then(|lb| lb["targets"].as_array().cloned())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct NameQuery {
    name: Option<String>,
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "code": code, "message": message } })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v == format!("Bearer {}", TOKEN))
}

async fn list_servers(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<NameQuery>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method: "GET",
        path: "/servers".to_string(),
        name: query.name.clone(),
        body: None,
    });
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthorized", "unable to authenticate");
    }

    let servers: Vec<Value> = state
        .servers
        .iter()
        .filter(|s| query.name.as_deref().map_or(true, |n| s["name"] == n))
        .cloned()
        .collect();
    Json(json!({ "servers": servers })).into_response()
}

async fn list_load_balancers(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<NameQuery>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method: "GET",
        path: "/load_balancers".to_string(),
        name: query.name.clone(),
        body: None,
    });
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthorized", "unable to authenticate");
    }

    let load_balancers: Vec<Value> = state
        .load_balancers
        .iter()
        .filter(|lb| query.name.as_deref().map_or(true, |n| lb["name"] == n))
        .cloned()
        .collect();
    Json(json!({ "load_balancers": load_balancers })).into_response()
}

async fn get_load_balancer(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method: "GET",
        path: format!("/load_balancers/{}", id),
        name: None,
        body: None,
    });
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthorized", "unable to authenticate");
    }
    if let Some(status) = state.fail_load_balancer_by_id {
        let status = StatusCode::from_u16(status).unwrap();
        return error(status, "service_error", "injected failure");
    }

    match state.load_balancers.iter().find(|lb| lb["id"] == id) {
        Some(lb) => Json(json!({ "load_balancer": lb })).into_response(),
        None => error(StatusCode::NOT_FOUND, "not_found", "load balancer not found"),
    }
}

async fn target_action(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((id, action)): Path<(u64, String)>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(Recorded {
        method: "POST",
        path: format!("/load_balancers/{}/actions/{}", id, action),
        name: None,
        body: Some(body.clone()),
    });
    if !authorized(&headers) {
        return error(StatusCode::UNAUTHORIZED, "unauthorized", "unable to authenticate");
    }

    let Some(lb) = state.load_balancers.iter_mut().find(|lb| lb["id"] == id) else {
        return error(StatusCode::NOT_FOUND, "not_found", "load balancer not found");
    };
    let server_id = body["server"]["id"].clone();
    let targets = lb["targets"].as_array_mut().unwrap();

    match action.as_str() {
        "add_target" => {
            if targets.iter().any(|t| t["server"]["id"] == server_id) {
                return error(StatusCode::CONFLICT, "target_already_defined", "target already defined");
            }
            targets.push(json!({
                "type": "server",
                "server": { "id": server_id },
                "use_private_ip": body["use_private_ip"].as_bool().unwrap_or(false)
            }));
        }
        "remove_target" => {
            targets.retain(|t| t["server"]["id"] != server_id);
        }
        _ => return error(StatusCode::NOT_FOUND, "not_found", "unknown action"),
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "action": {
                "id": state.requests.len(),
                "command": action,
                "status": "running",
                "progress": 0,
                "error": null
            }
        })),
    )
        .into_response()
}
