//! Web chat front-end.
//!
//! One turn: the model plans a single tool call (or answers directly), the
//! tool runs through a [`ToolBackend`], and the model summarizes the
//! result. Per-session history is kept in memory only.

pub mod backend;
pub mod planner;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::ollama::OllamaClient;
use crate::service::MlbService;
use backend::{StdioToolServer, ToolBackend, ToolSchema};
use planner::Plan;

const PAGE_TEMPLATE: &str = include_str!("../assets/chat.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Tool,
    Assistant,
}

/// One rendered line of a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
    /// Assistant text rendered from Markdown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Tool call arguments and result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl ChatEntry {
    fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
            html: None,
            extra: None,
            timestamp: Utc::now(),
        }
    }

    fn tool(name: &str, extra: Value) -> Self {
        Self {
            role: ChatRole::Tool,
            content: name.to_string(),
            html: None,
            extra: Some(extra),
            timestamp: Utc::now(),
        }
    }

    fn assistant(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            role: ChatRole::Assistant,
            html: Some(markdown::to_html(&content)),
            content,
            extra: None,
            timestamp: Utc::now(),
        }
    }
}

/// Chat front-end state
pub struct ChatState {
    config: ChatConfig,
    backend: ToolBackend,
    ollama: OllamaClient,
    /// Discovered once when the backend connects
    tools: Vec<ToolSchema>,
    sessions: DashMap<String, Vec<ChatEntry>>,
}

impl ChatState {
    /// Connect the configured backend: a child tool server when
    /// `server_cmd` is set, otherwise the in-process service
    pub async fn connect(config: ChatConfig, service: Arc<MlbService>) -> ServiceResult<Self> {
        let backend = match config.server_command() {
            Some((program, args)) => {
                ToolBackend::Stdio(StdioToolServer::spawn(&program, &args).await?)
            }
            None => ToolBackend::Local(service),
        };
        let ollama = OllamaClient::new(&config)?;
        Self::with_backend(config, backend, ollama).await
    }

    pub async fn with_backend(
        config: ChatConfig,
        backend: ToolBackend,
        ollama: OllamaClient,
    ) -> ServiceResult<Self> {
        let tools = backend.list_tools().await?;
        info!(
            backend = %backend.describe(),
            model = %ollama.model(),
            tools = tools.len(),
            "Chat front-end connected"
        );

        Ok(Self {
            config,
            backend,
            ollama,
            tools,
            sessions: DashMap::new(),
        })
    }

    /// Run one turn and append it to the session history.
    ///
    /// Model and tool failures become an assistant `Error:` entry.
    pub async fn run_turn(&self, session_id: &str, message: &str) -> Vec<ChatEntry> {
        let mut entries = vec![ChatEntry::user(message)];

        if let Err(e) = self.plan_and_answer(message, &mut entries).await {
            warn!(session_id = %session_id, error = %e, "Chat turn failed");
            entries.push(ChatEntry::assistant(format!("Error: {}", e)));
        }

        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .extend(entries.iter().cloned());
        entries
    }

    async fn plan_and_answer(&self, message: &str, entries: &mut Vec<ChatEntry>) -> ServiceResult<()> {
        let reply = self
            .ollama
            .chat(planner::plan_messages(&self.tools, message), true)
            .await?;

        match planner::parse_plan(&reply) {
            Plan::Final(text) => {
                entries.push(ChatEntry::assistant(text));
            }
            Plan::CallTool {
                tool_name,
                args,
                reason,
            } => {
                info!(tool = %tool_name, reason = ?reason, "Planner chose tool");
                let result = self.backend.call_tool(&tool_name, args.clone()).await?;
                entries.push(ChatEntry::tool(
                    &tool_name,
                    json!({ "args": args, "reason": reason, "result": result }),
                ));

                let summary = self
                    .ollama
                    .chat(
                        planner::reflect_messages(message, &tool_name, &args, &result),
                        false,
                    )
                    .await?;
                entries.push(ChatEntry::assistant(summary));
            }
        }
        Ok(())
    }

    /// Whether the model endpoint answers
    pub async fn model_available(&self) -> bool {
        self.ollama.health_check().await
    }

    pub fn history(&self, session_id: &str) -> Vec<ChatEntry> {
        self.sessions
            .get(session_id)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    /// Drop a session. Returns whether it existed.
    pub fn disconnect(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    fn render_page(&self) -> String {
        PAGE_TEMPLATE
            .replace("{model}", &escape_html(&self.config.model))
            .replace("{region}", &escape_html(&self.config.region))
            .replace("{server_cmd}", &escape_html(&self.backend.describe()))
            .replace("{tool_count}", &self.tools.len().to_string())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Build the chat router, mounted under `/chat`
pub fn chat_router(state: Arc<ChatState>) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/api/tools", get(tools_handler))
        .route("/api/message", axum::routing::post(message_handler))
        .route(
            "/api/history/{session_id}",
            get(history_handler).delete(disconnect_handler),
        )
        .with_state(state)
}

async fn page_handler(State(state): State<Arc<ChatState>>) -> Html<String> {
    Html(state.render_page())
}

async fn tools_handler(State(state): State<Arc<ChatState>>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.clone())
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub session_id: String,
    pub entries: Vec<ChatEntry>,
}

async fn message_handler(
    State(state): State<Arc<ChatState>>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ServiceError::InvalidRequest {
            message: "message must not be empty".to_string(),
        });
    }

    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let entries = state.run_turn(&session_id, message).await;

    Ok(Json(MessageResponse {
        session_id,
        entries,
    }))
}

async fn history_handler(
    State(state): State<Arc<ChatState>>,
    Path(session_id): Path<String>,
) -> Json<MessageResponse> {
    let entries = state.history(&session_id);
    Json(MessageResponse {
        session_id,
        entries,
    })
}

async fn disconnect_handler(
    State(state): State<Arc<ChatState>>,
    Path(session_id): Path<String>,
) -> StatusCode {
    if state.disconnect(&session_id) {
        info!(session_id = %session_id, "Chat session dropped");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::tools::test_support::service_for;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model_reply(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": content},
            "done": true
        }))
    }

    async fn chat_state(stats: &MockServer, model: &MockServer) -> Arc<ChatState> {
        let mut config = AppConfig::default().chat;
        config.base_url = model.uri();
        let ollama = OllamaClient::new(&config).unwrap();
        let backend = ToolBackend::Local(Arc::new(service_for(stats)));
        Arc::new(ChatState::with_backend(config, backend, ollama).await.unwrap())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_turn_with_tool_call() {
        let stats = MockServer::start().await;
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"format": "json"})))
            .respond_with(model_reply(
                r#"{"tool_name": "team_id", "args": {"name": "Dodgers"}, "reason": "need id"}"#,
            ))
            .expect(1)
            .mount(&model)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(model_reply("The **Dodgers** have team id 119."))
            .mount(&model)
            .await;

        let state = chat_state(&stats, &model).await;
        let entries = state.run_turn("s1", "What is the Dodgers team id?").await;

        let roles: Vec<ChatRole> = entries.iter().map(|e| e.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Tool, ChatRole::Assistant]);
        assert_eq!(entries[1].content, "team_id");
        assert_eq!(entries[1].extra.as_ref().unwrap()["result"]["matches"][0]["id"], 119);
        assert!(entries[2].html.as_ref().unwrap().contains("<strong>Dodgers</strong>"));
        assert_eq!(state.history("s1").len(), 3);
    }

    #[tokio::test]
    async fn test_turn_with_final_answer_and_tool_error() {
        let stats = MockServer::start().await;
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(model_reply(r#"{"final": "Which team do you mean?"}"#))
            .up_to_n_times(1)
            .mount(&model)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(model_reply(r#"{"tool_name": "roster", "args": {}}"#))
            .mount(&model)
            .await;

        let state = chat_state(&stats, &model).await;
        let first = state.run_turn("s2", "roster please").await;
        assert_eq!(first[1].content, "Which team do you mean?");

        let second = state.run_turn("s2", "roster please").await;
        assert_eq!(second.len(), 2);
        assert!(second[1].content.starts_with("Error: Invalid argument"));
        assert_eq!(state.history("s2").len(), 4);
        assert!(state.disconnect("s2"));
        assert!(state.history("s2").is_empty());
    }

    #[tokio::test]
    async fn test_routes() {
        let stats = MockServer::start().await;
        let model = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(model_reply(r#"{"final": "Hello!"}"#))
            .mount(&model)
            .await;

        let state = chat_state(&stats, &model).await;
        let app = Router::new().nest("/chat", chat_router(state));

        let page = app
            .clone()
            .oneshot(Request::get("/chat").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(page.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(page.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("llama3.2"));
        assert!(html.contains("in-process"));

        let tools = app
            .clone()
            .oneshot(Request::get("/chat/api/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let tools = body_json(tools).await;
        assert!(tools.as_array().unwrap().iter().any(|t| t["name"] == "boxscore"));

        let reply = app
            .clone()
            .oneshot(
                Request::post("/chat/api/message")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"message": "hi"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(reply.status(), StatusCode::OK);
        let reply = body_json(reply).await;
        let session_id = reply["session_id"].as_str().unwrap().to_string();
        assert_eq!(reply["entries"][1]["content"], "Hello!");

        let history = app
            .clone()
            .oneshot(
                Request::get(format!("/chat/api/history/{}", session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(history).await["entries"].as_array().unwrap().len(), 2);

        let deleted = app
            .clone()
            .oneshot(
                Request::delete(format!("/chat/api/history/{}", session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let empty = app
            .oneshot(
                Request::post("/chat/api/message")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"message": "  "}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    }
}
