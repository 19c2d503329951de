//! HTTP client for a LiteLLM-compatible proxy admin API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, warn};

use notehub_core::config::LlmProxyConfig;
use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::UserId;

use super::plans::{self, FREE};

/// Spend and limit of one proxy key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyUsage {
    /// Amount spent so far, in USD.
    pub spend: f64,
    /// Current budget limit, in USD.
    pub max_budget: f64,
    /// Plan recorded in the key metadata.
    pub plan: String,
}

/// Mints and manages per-user virtual keys on the proxy.
#[derive(Debug, Clone)]
pub struct LlmProxyClient {
    client: Client,
    base_url: String,
    master_key: Option<String>,
}

impl LlmProxyClient {
    /// Creates a client from configuration.
    pub fn new(config: &LlmProxyConfig) -> AppResult<Self> {
        let master_key = config.master_key.clone().filter(|key| !key.is_empty());
        if master_key.is_none() {
            warn!("LLM proxy master key is not set; proxy admin calls will be rejected");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            master_key,
        })
    }

    /// Generate a key for `user_id` with the limits of `plan_name`.
    ///
    /// Unknown plans get the free plan's limits; the requested name is still
    /// recorded in the key metadata.
    pub async fn generate_key(
        &self,
        user_id: &UserId,
        plan_name: &str,
        email: Option<&str>,
    ) -> AppResult<String> {
        let limits = plans::plan(plan_name).unwrap_or(FREE);
        let payload = json!({
            "user_id": user_id.to_string(),
            "metadata": { "user_email": email, "plan": plan_name },
            "max_budget": limits.max_budget,
            "tpm_limit": limits.tpm_limit,
            "rpm_limit": limits.rpm_limit,
            "models": limits.models,
        });

        info!(user_id = %user_id, plan = plan_name, "Generating LLM proxy key");
        let body = self
            .send(self.post("/key/generate").json(&payload), "generate key")
            .await?;

        body.get("key")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::external_service("LLM proxy response has no 'key' field"))
    }

    /// Apply the limits of `plan_name` to an existing key.
    pub async fn upgrade_plan(&self, key: &str, plan_name: &str) -> AppResult<()> {
        let limits = plans::plan(plan_name)
            .ok_or_else(|| AppError::validation(format!("Plan '{plan_name}' does not exist")))?;
        let payload = json!({
            "key": key,
            "max_budget": limits.max_budget,
            "tpm_limit": limits.tpm_limit,
            "rpm_limit": limits.rpm_limit,
            "models": limits.models,
            "metadata": { "plan": plan_name },
        });

        self.send(self.post("/key/update").json(&payload), "update key")
            .await?;
        info!(plan = plan_name, "Upgraded LLM proxy key");
        Ok(())
    }

    /// Raise a key's budget by `amount` and return the new budget.
    pub async fn top_up_budget(&self, key: &str, amount: f64) -> AppResult<f64> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::validation("Top-up amount must be a positive number"));
        }

        let info = self.key_info(key).await?;
        let current = info.get("max_budget").and_then(Value::as_f64).unwrap_or(0.0);
        let new_budget = current + amount;

        let payload = json!({ "key": key, "max_budget": new_budget });
        self.send(self.post("/key/update").json(&payload), "update key")
            .await?;

        info!(from = current, to = new_budget, "Raised LLM proxy key budget");
        Ok(new_budget)
    }

    /// Spend, budget, and plan of a key.
    pub async fn usage(&self, key: &str) -> AppResult<KeyUsage> {
        let info = self.key_info(key).await?;
        Ok(KeyUsage {
            spend: info.get("spend").and_then(Value::as_f64).unwrap_or(0.0),
            max_budget: info.get("max_budget").and_then(Value::as_f64).unwrap_or(0.0),
            plan: info
                .get("metadata")
                .and_then(|m| m.get("plan"))
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
        })
    }

    /// Key details. Proxies nest them under `info`; a flat body is accepted too.
    async fn key_info(&self, key: &str) -> AppResult<Value> {
        let url = Url::parse_with_params(&format!("{}/key/info", self.base_url), &[("key", key)])
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid LLM proxy URL", e)
            })?;
        let mut body = self.send(self.authorize(self.client.get(url)), "key info").await?;
        Ok(match body.get_mut("info") {
            Some(info) if info.is_object() => info.take(),
            _ => body,
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(format!("{}{path}", self.base_url)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.master_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> AppResult<Value> {
        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("LLM proxy {action} request failed"),
                e,
            )
        })?;
        read_json(response, action).await
    }
}

async fn read_json(response: Response, action: &str) -> AppResult<Value> {
    let status = response.status();
    let text = response.text().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("Failed to read LLM proxy {action} response"),
            e,
        )
    })?;

    if !status.is_success() {
        return Err(AppError::external_service(format!(
            "LLM proxy {action} returned {status}: {text}"
        )));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("LLM proxy {action} returned invalid JSON"),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    use super::*;

    const MASTER: &str = "sk-master";

    #[derive(Clone, Default)]
    struct Proxy {
        generated: Arc<Mutex<Vec<Value>>>,
        updates: Arc<Mutex<Vec<Value>>>,
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {MASTER}"))
    }

    async fn generate(
        State(proxy): State<Proxy>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad master key"})));
        }
        proxy.generated.lock().unwrap().push(body);
        (StatusCode::OK, Json(json!({"key": "sk-user-1"})))
    }

    async fn update(State(proxy): State<Proxy>, Json(body): Json<Value>) -> Json<Value> {
        proxy.updates.lock().unwrap().push(body);
        Json(json!({"ok": true}))
    }

    async fn info(
        Query(params): Query<std::collections::HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        match params.get("key").map(String::as_str) {
            Some("sk-user-1") => (
                StatusCode::OK,
                Json(json!({
                    "key": "sk-user-1",
                    "info": {"spend": 0.2, "max_budget": 0.5, "metadata": {"plan": "free"}}
                })),
            ),
            Some("sk-bare") => (StatusCode::OK, Json(json!({"spend": 1.0}))),
            _ => (StatusCode::NOT_FOUND, Json(json!({"error": "no such key"}))),
        }
    }

    async fn start_proxy() -> (LlmProxyClient, Proxy) {
        let proxy = Proxy::default();
        let app = Router::new()
            .route("/key/generate", post(generate))
            .route("/key/update", post(update))
            .route("/key/info", get(info))
            .with_state(proxy.clone());

        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = LlmProxyConfig {
            base_url: format!("http://{addr}/"),
            master_key: Some(MASTER.to_string()),
            request_timeout_seconds: 5,
        };
        (LlmProxyClient::new(&config).unwrap(), proxy)
    }

    #[tokio::test]
    async fn test_generate_key_unknown_plan_uses_free_limits() {
        let (client, proxy) = start_proxy().await;
        let user = UserId::new();

        let key = client
            .generate_key(&user, "gold", Some("a@example.com"))
            .await
            .unwrap();
        assert_eq!(key, "sk-user-1");

        let sent = proxy.generated.lock().unwrap()[0].clone();
        assert_eq!(sent["user_id"], json!(user.to_string()));
        assert_eq!(sent["max_budget"], json!(0.5));
        assert_eq!(sent["rpm_limit"], json!(5));
        assert_eq!(sent["models"], json!(["*"]));
        assert_eq!(sent["metadata"], json!({"user_email": "a@example.com", "plan": "gold"}));
    }

    #[tokio::test]
    async fn test_missing_master_key_surfaces_proxy_error() {
        let (client, _proxy) = start_proxy().await;
        let client = LlmProxyClient {
            master_key: None,
            ..client
        };

        let err = client
            .generate_key(&UserId::new(), "free", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(err.message.contains("bad master key"));
    }

    #[tokio::test]
    async fn test_upgrade_plan() {
        let (client, proxy) = start_proxy().await;

        client.upgrade_plan("sk-user-1", "pro").await.unwrap();
        let sent = proxy.updates.lock().unwrap()[0].clone();
        assert_eq!(sent["max_budget"], json!(20.0));
        assert_eq!(sent["tpm_limit"], json!(200_000));
        assert_eq!(sent["metadata"], json!({"plan": "pro"}));

        let err = client.upgrade_plan("sk-user-1", "gold").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(proxy.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_top_up_adds_to_current_budget() {
        let (client, proxy) = start_proxy().await;

        let budget = client.top_up_budget("sk-user-1", 5.0).await.unwrap();
        assert!((budget - 5.5).abs() < 1e-9);
        let sent = proxy.updates.lock().unwrap()[0].clone();
        assert_eq!(sent, json!({"key": "sk-user-1", "max_budget": 5.5}));

        let budget = client.top_up_budget("sk-bare", 2.0).await.unwrap();
        assert!((budget - 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_usage() {
        let (client, _proxy) = start_proxy().await;

        let usage = client.usage("sk-user-1").await.unwrap();
        assert_eq!(
            usage,
            KeyUsage {
                spend: 0.2,
                max_budget: 0.5,
                plan: "free".to_string()
            }
        );

        let bare = client.usage("sk-bare").await.unwrap();
        assert_eq!(bare.plan, "unknown");
        assert_eq!(bare.max_budget, 0.0);

        let err = client.usage("sk-missing").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(err.message.contains("no such key"));
    }
}
