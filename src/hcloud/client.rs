//! Hetzner Cloud REST client.
//!
//! # Responsibilities
//! - Authenticate every request with the API token
//! - Look up servers and load balancers by name or ID
//! - Add and remove load balancer server targets
//! - Map API error documents to typed errors
//!
//! The client performs no retries. The only timeout is the per-request
//! timeout configured on the underlying HTTP client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::schema::ApiConfig;
use crate::hcloud::types::{
    Action, ApiError, ApiResult, LoadBalancer, LoadBalancerId, Server, ServerRef,
};

const USER_AGENT: &str = concat!("hcloud-connect/", env!("CARGO_PKG_VERSION"));

/// Remote operations the registration logic depends on.
///
/// Lookups return `Ok(None)` when the API has no matching resource and
/// `Err` only for transport or API failures.
#[async_trait]
pub trait CloudApi: Send + Sync {
    async fn load_balancer_by_name(&self, name: &str) -> ApiResult<Option<LoadBalancer>>;

    async fn load_balancer_by_id(&self, id: LoadBalancerId) -> ApiResult<Option<LoadBalancer>>;

    async fn server_by_name(&self, name: &str) -> ApiResult<Option<Server>>;

    async fn add_server_target(
        &self,
        load_balancer: &LoadBalancer,
        server: &Server,
        use_private_ip: bool,
    ) -> ApiResult<Action>;

    async fn remove_server_target(
        &self,
        load_balancer: &LoadBalancer,
        server: &Server,
    ) -> ApiResult<Action>;

    /// Look up a load balancer by ID if `id_or_name` is numeric, by name otherwise.
    async fn load_balancer(&self, id_or_name: &str) -> ApiResult<Option<LoadBalancer>> {
        match id_or_name.parse::<u64>() {
            Ok(id) => self.load_balancer_by_id(LoadBalancerId(id)).await,
            Err(_) => self.load_balancer_by_name(id_or_name).await,
        }
    }
}

#[derive(Deserialize)]
struct ServerList {
    servers: Vec<Server>,
}

#[derive(Deserialize)]
struct LoadBalancerList {
    load_balancers: Vec<LoadBalancer>,
}

#[derive(Deserialize)]
struct LoadBalancerEnvelope {
    load_balancer: LoadBalancer,
}

#[derive(Deserialize)]
struct ActionEnvelope {
    action: Action,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Serialize)]
struct TargetRequest {
    #[serde(rename = "type")]
    target_type: &'static str,
    server: ServerRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_private_ip: Option<bool>,
}

/// HTTP client for the Hetzner Cloud API.
#[derive(Clone)]
pub struct HcloudClient {
    http: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl HcloudClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - API endpoint, token and request timeout
    ///
    /// # Returns
    /// A new client, or an error if the endpoint or token is unusable
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let endpoint: url::Url = config.endpoint.parse().map_err(|e| {
            ApiError::InvalidEndpoint(format!("'{}': {}", config.endpoint, e))
        })?;

        let token = config.token.as_deref().unwrap_or_default();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.as_str().trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Base URL requests are issued against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn target_action(
        &self,
        load_balancer: &LoadBalancer,
        action: &str,
        body: &TargetRequest,
    ) -> ApiResult<Action> {
        let url = self.url(&format!("load_balancers/{}/actions/{}", load_balancer.id, action));
        let envelope: ActionEnvelope = self.send(self.http.post(url).json(body)).await?;

        tracing::debug!(
            load_balancer = %load_balancer.id,
            server = %body.server.id,
            action_id = envelope.action.id,
            command = %envelope.action.command,
            status = %envelope.action.status,
            "Target action accepted"
        );
        Ok(envelope.action)
    }
}

fn error_from_body(status: StatusCode, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Api {
            status: status.as_u16(),
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => ApiError::Api {
            status: status.as_u16(),
            code: "unknown".to_string(),
            message: String::from_utf8_lossy(body).trim().to_string(),
        },
    }
}

#[async_trait]
impl CloudApi for HcloudClient {
    async fn load_balancer_by_name(&self, name: &str) -> ApiResult<Option<LoadBalancer>> {
        if name.is_empty() {
            return Ok(None);
        }
        let request = self.http.get(self.url("load_balancers")).query(&[("name", name)]);
        let list: LoadBalancerList = self.send(request).await?;
        Ok(list.load_balancers.into_iter().next())
    }

    async fn load_balancer_by_id(&self, id: LoadBalancerId) -> ApiResult<Option<LoadBalancer>> {
        let request = self.http.get(self.url(&format!("load_balancers/{}", id)));
        match self.send::<LoadBalancerEnvelope>(request).await {
            Ok(envelope) => Ok(Some(envelope.load_balancer)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn server_by_name(&self, name: &str) -> ApiResult<Option<Server>> {
        if name.is_empty() {
            return Ok(None);
        }
        let request = self.http.get(self.url("servers")).query(&[("name", name)]);
        let list: ServerList = self.send(request).await?;
        Ok(list.servers.into_iter().next())
    }

    async fn add_server_target(
        &self,
        load_balancer: &LoadBalancer,
        server: &Server,
        use_private_ip: bool,
    ) -> ApiResult<Action> {
        let body = TargetRequest {
            target_type: "server",
            server: ServerRef { id: server.id },
            use_private_ip: Some(use_private_ip),
        };
        self.target_action(load_balancer, "add_target", &body).await
    }

    async fn remove_server_target(
        &self,
        load_balancer: &LoadBalancer,
        server: &Server,
    ) -> ApiResult<Action> {
        let body = TargetRequest {
            target_type: "server",
            server: ServerRef { id: server.id },
            use_private_ip: None,
        };
        self.target_action(load_balancer, "remove_target", &body).await
    }
}

impl std::fmt::Debug for HcloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HcloudClient")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
