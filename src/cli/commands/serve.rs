//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for chatting with the agent and for direct
//! catalog lookups.

use crate::agent::{Agent, AgentStep, EpisodeOutcome};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::memory::ConversationTurn;
use crate::orchestrator::Orchestrator;
use crate::rag::CourseSearchTool;
use crate::session::apology;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared application state.
struct AppState {
    agent: Agent,
    course_search: CourseSearchTool,
    catalog_available: bool,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings).await?;
    let state = Arc::new(AppState {
        agent: orchestrator.create_agent()?,
        course_search: orchestrator.course_search_tool(),
        catalog_available: orchestrator.index().is_available(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state).layer(cors);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Kurs API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat", "POST /chat");
    Output::kv("Course search", "POST /course-search");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/course-search", post(course_search))
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    catalog: &'static str,
}

#[derive(Deserialize)]
struct ChatRequest {
    input: String,
    /// Conversation so far, oldest first.
    #[serde(default)]
    history: Vec<ConversationTurn>,
}

#[derive(Serialize)]
struct ChatResponse {
    output: String,
    iterations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<EpisodeOutcome>,
    steps: Vec<AgentStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct CourseSearchRequest {
    query: String,
}

#[derive(Serialize)]
struct CourseSearchResponse {
    result: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        catalog: if state.catalog_available {
            "ready"
        } else {
            "unavailable"
        },
    })
}

async fn chat(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    match state.agent.handle(&req.input, &req.history).await {
        Ok(response) => Json(ChatResponse {
            output: response.output,
            iterations: response.iterations,
            outcome: Some(response.outcome),
            steps: response.steps,
            error: None,
        }),
        Err(e) => {
            error!("Chat request failed: {}", e);
            Json(ChatResponse {
                output: apology(&e),
                iterations: 0,
                outcome: None,
                steps: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

async fn course_search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CourseSearchRequest>,
) -> Result<Json<CourseSearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .course_search
        .course_search(&req.query)
        .await
        .map(|result| Json(CourseSearchResponse { result }))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ToolRegistry;
    use crate::embedding::HashEmbedder;
    use crate::indexer::CatalogIndex;
    use crate::rag::DATABASE_UNAVAILABLE;
    use crate::testing::ScriptedModel;

    fn state(llm: Arc<ScriptedModel>) -> Arc<AppState> {
        let course_search = CourseSearchTool::new(
            &CatalogIndex::unavailable("absent"),
            Arc::new(HashEmbedder::default()),
            llm.clone(),
            3,
        );
        Arc::new(AppState {
            agent: Agent::new(llm, ToolRegistry::new()),
            course_search,
            catalog_available: false,
        })
    }

    #[tokio::test]
    async fn test_chat_returns_agent_output() {
        let llm = Arc::new(ScriptedModel::replies(vec!["Final Answer: Try Bakery Business."]));
        let req = ChatRequest {
            input: "I like baking".to_string(),
            history: vec![ConversationTurn::assistant("Hello!")],
        };

        let Json(response) = chat(State(state(llm.clone())), Json(req)).await;

        assert_eq!(response.output, "Try Bakery Business.");
        assert_eq!(response.outcome, Some(EpisodeOutcome::Finished));
        assert!(response.error.is_none());
        assert!(llm.requests()[0].prompt.contains("Assistant: Hello!"));
    }

    #[tokio::test]
    async fn test_chat_failure_becomes_apology() {
        let llm = Arc::new(ScriptedModel::failing("service unavailable"));
        let req = ChatRequest {
            input: "hi".to_string(),
            history: Vec::new(),
        };

        let Json(response) = chat(State(state(llm)), Json(req)).await;

        assert!(response.output.starts_with("I apologize, but I encountered an issue:"));
        assert!(response.outcome.is_none());
        assert!(response.error.unwrap().contains("service unavailable"));
    }

    #[tokio::test]
    async fn test_course_search_without_catalog() {
        let llm = Arc::new(ScriptedModel::replies(vec![]));
        let req = CourseSearchRequest {
            query: "goats".to_string(),
        };

        let Json(response) = course_search(State(state(llm)), Json(req)).await.ok().unwrap();
        assert_eq!(response.result, DATABASE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_reports_catalog_state() {
        let Json(response) = health(State(state(Arc::new(ScriptedModel::replies(vec![]))))).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.catalog, "unavailable");
    }
}
