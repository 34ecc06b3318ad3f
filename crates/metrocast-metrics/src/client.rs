//! GraphQL client for the Weights & Biases API.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::MetricsError;
use crate::types::{HistoryPoint, RunMetrics};

const WANDB_API_URL: &str = "https://api.wandb.ai/graphql";
const REQUEST_TIMEOUT_SECS: u64 = 10;

const LATEST_RUN_QUERY: &str = r#"
query GetLatestFinishedRun($entity: String!, $project: String!) {
    project(name: $project, entityName: $entity) {
        runs(last: 1, filters: "{\"state\": \"finished\"}") {
            edges {
                node {
                    name
                    state
                    updatedAt
                    duration
                    summaryMetrics
                }
            }
        }
    }
}"#;

const RUN_HISTORY_QUERY: &str = r#"
query GetRunHistory($entity: String!, $project: String!) {
    project(name: $project, entityName: $entity) {
        runs(last: 1) {
            edges {
                node {
                    sampledHistory(keys: ["train/loss", "val/mae_celsius", "epoch"], samples: 50)
                }
            }
        }
    }
}"#;

pub struct MetricsClient {
    client: Client,
    api_url: String,
    entity: String,
    project: String,
    auth_header: String,
}

impl MetricsClient {
    pub fn new(entity: &str, project: &str, api_key: &str) -> Result<Self, MetricsError> {
        Self::with_api_url(WANDB_API_URL, entity, project, api_key)
    }

    pub fn with_api_url(
        api_url: &str,
        entity: &str,
        project: &str,
        api_key: &str,
    ) -> Result<Self, MetricsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let credential = BASE64.encode(format!("api:{}", api_key));

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            entity: entity.to_string(),
            project: project.to_string(),
            auth_header: format!("Basic {}", credential),
        })
    }

    /// Summary metrics of the latest finished run, or None when the project
    /// has none yet.
    #[instrument(skip(self), level = "info")]
    pub async fn latest_run(&self) -> Result<Option<RunMetrics>, MetricsError> {
        let node = match self.run_query(LATEST_RUN_QUERY).await? {
            Some(node) => node,
            None => return Ok(None),
        };

        // summaryMetrics arrives as a JSON document encoded in a string
        let summary: Value = node
            .summary_metrics
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| MetricsError::Parse(format!("summary metrics: {}", e)))?
            .unwrap_or(Value::Null);

        Ok(Some(RunMetrics {
            loss: metric(&summary, &["train/loss", "loss"]),
            val_loss: metric(&summary, &["val/loss"]),
            mae: metric(&summary, &["train/mae_celsius"]),
            val_mae: metric(&summary, &["val/mae_celsius"]),
            epoch: metric(&summary, &["epoch"]),
            state: node.state.unwrap_or_default(),
            updated_at: node.updated_at.unwrap_or_default(),
            duration: node.duration,
            total_steps: metric(&summary, &["global_step", "Step", "train/global_step"]),
        }))
    }

    /// Sampled loss/MAE history of the latest run, sorted by epoch.
    /// An absent run or empty history comes back as an empty vector.
    #[instrument(skip(self), level = "info")]
    pub async fn run_history(&self) -> Result<Vec<HistoryPoint>, MetricsError> {
        let node = match self.run_query(RUN_HISTORY_QUERY).await? {
            Some(node) => node,
            None => return Ok(Vec::new()),
        };

        // sampledHistory is a list with one entry per requested key set
        let items = node
            .sampled_history
            .as_ref()
            .and_then(|h| h.get(0))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut points: Vec<HistoryPoint> = items
            .iter()
            .map(|item| HistoryPoint {
                epoch: item.get("epoch").and_then(Value::as_f64).unwrap_or(0.0),
                loss: item
                    .get("train/loss")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
                val_mae: item
                    .get("val/mae_celsius")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            })
            .collect();

        points.sort_by(|a, b| a.epoch.total_cmp(&b.epoch));
        Ok(points)
    }

    /// Run a query against the project and return the first run node, if any.
    async fn run_query(&self, query: &str) -> Result<Option<RunNode>, MetricsError> {
        let body = serde_json::json!({
            "query": query,
            "variables": { "entity": self.entity, "project": self.project },
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", &self.auth_header)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(MetricsError::Unauthorized);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(MetricsError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let resp: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| MetricsError::Parse(format!("JSON parse error: {}", e)))?;

        let node = resp
            .data
            .and_then(|d| d.project)
            .and_then(|p| p.runs)
            .and_then(|r| r.edges.into_iter().next())
            .map(|e| e.node);

        Ok(node)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    runs: Option<RunConnection>,
}

#[derive(Debug, Deserialize)]
struct RunConnection {
    #[serde(default)]
    edges: Vec<RunEdge>,
}

#[derive(Debug, Deserialize)]
struct RunEdge {
    node: RunNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunNode {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    summary_metrics: Option<String>,
    #[serde(default)]
    sampled_history: Option<Value>,
}

fn metric(summary: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| summary.get(key).and_then(Value::as_f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn latest_run_body(summary: &str) -> serde_json::Value {
        serde_json::json!({
            "data": {
                "project": {
                    "runs": {
                        "edges": [{
                            "node": {
                                "name": "run-7",
                                "state": "finished",
                                "updatedAt": "2024-03-01T10:00:00Z",
                                "duration": 1234.0,
                                "summaryMetrics": summary,
                            }
                        }]
                    }
                }
            }
        })
    }

    #[tokio::test]
    async fn latest_run_decodes_summary_string() {
        let mock_server = MockServer::start().await;
        let summary = r#"{"train/loss": 0.0123, "val/loss": 0.0201, "train/mae_celsius": 0.91, "val/mae_celsius": 1.12, "epoch": 40, "global_step": 52000}"#;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("Authorization", "Basic YXBpOnNlY3JldA=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(latest_run_body(summary)))
            .mount(&mock_server)
            .await;

        let client =
            MetricsClient::with_api_url(&mock_server.uri(), "team", "metrocast-ai", "secret")
                .unwrap();
        let metrics = client.latest_run().await.unwrap().unwrap();

        assert_eq!(metrics.state, "finished");
        assert!((metrics.loss.unwrap() - 0.0123).abs() < 1e-9);
        assert!((metrics.val_mae.unwrap() - 1.12).abs() < 1e-9);
        assert_eq!(metrics.epoch, Some(40.0));
        assert_eq!(metrics.total_steps, Some(52000.0));
    }

    #[tokio::test]
    async fn summary_key_fallbacks_apply() {
        let mock_server = MockServer::start().await;
        // Older runs log "loss" and "Step" instead of the train/ keys
        let summary = r#"{"loss": 0.5, "Step": 900}"#;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(latest_run_body(summary)))
            .mount(&mock_server)
            .await;

        let client =
            MetricsClient::with_api_url(&mock_server.uri(), "team", "metrocast-ai", "secret")
                .unwrap();
        let metrics = client.latest_run().await.unwrap().unwrap();

        assert_eq!(metrics.loss, Some(0.5));
        assert_eq!(metrics.total_steps, Some(900.0));
        assert_eq!(metrics.mae, None);
    }

    #[tokio::test]
    async fn project_without_runs_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "project": { "runs": { "edges": [] } } }
            })))
            .mount(&mock_server)
            .await;

        let client =
            MetricsClient::with_api_url(&mock_server.uri(), "team", "metrocast-ai", "secret")
                .unwrap();
        assert!(client.latest_run().await.unwrap().is_none());
        assert!(client.run_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_api_key_is_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client =
            MetricsClient::with_api_url(&mock_server.uri(), "team", "metrocast-ai", "wrong")
                .unwrap();
        assert!(matches!(
            client.latest_run().await,
            Err(MetricsError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn history_is_sorted_by_epoch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "project": {
                        "runs": {
                            "edges": [{
                                "node": {
                                    "sampledHistory": [[
                                        { "epoch": 3, "train/loss": 0.10, "val/mae_celsius": 1.9 },
                                        { "epoch": 1, "train/loss": 0.40, "val/mae_celsius": 2.8 },
                                        { "epoch": 2, "train/loss": 0.22, "val/mae_celsius": 2.2 }
                                    ]]
                                }
                            }]
                        }
                    }
                }
            })))
            .mount(&mock_server)
            .await;

        let client =
            MetricsClient::with_api_url(&mock_server.uri(), "team", "metrocast-ai", "secret")
                .unwrap();
        let history = client.run_history().await.unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].epoch, 1.0);
        assert_eq!(history[2].epoch, 3.0);
        assert!((history[0].loss - 0.40).abs() < 1e-9);
        assert!((history[1].val_mae - 2.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn malformed_summary_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(latest_run_body("{not json")))
            .mount(&mock_server)
            .await;

        let client =
            MetricsClient::with_api_url(&mock_server.uri(), "team", "metrocast-ai", "secret")
                .unwrap();
        assert!(matches!(
            client.latest_run().await,
            Err(MetricsError::Parse(_))
        ));
    }
}
