use crate::error::AppError;
use axum::{
    extract::{Path, Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
    routing::get,
    Router,
};
use nodescope_core::{view::filter_by_name, FetchOutcome, NormalizedNode};
use nodescope_fetch::Candidate;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

#[derive(Clone)]
pub struct AppState {
    pub updates: watch::Receiver<FetchOutcome>,
    pub candidates: Arc<Vec<Candidate>>,
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/cluster/nodes", get(list_nodes))
        .route("/cluster/nodes/{name}", get(get_node))
        .route("/cluster/endpoints", get(list_endpoints))
        .route("/cluster/stream", get(node_stream))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct NodesQuery {
    #[serde(default)]
    search: String,
}

#[derive(Debug, Serialize)]
pub struct NodesResponse {
    pub success: bool,
    pub error: Option<String>,
    pub total: usize,
    pub nodes: Vec<NormalizedNode>,
}

async fn list_nodes(
    State(state): State<AppState>,
    Query(query): Query<NodesQuery>,
) -> Json<NodesResponse> {
    let outcome = state.updates.borrow().clone();
    let nodes = filter_by_name(&outcome.nodes, &query.search)
        .into_iter()
        .cloned()
        .collect();

    Json(NodesResponse {
        success: outcome.success,
        error: outcome.error,
        total: outcome.nodes.len(),
        nodes,
    })
}

async fn get_node(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<NormalizedNode>, AppError> {
    let found = state
        .updates
        .borrow()
        .nodes
        .iter()
        .find(|node| node.name == name)
        .cloned();

    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Node not found: {}", name)))
}

async fn list_endpoints(State(state): State<AppState>) -> Json<Vec<Candidate>> {
    Json(state.candidates.as_ref().clone())
}

async fn node_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = WatchStream::new(state.updates).map(|outcome| Event::default().json_data(&outcome));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(10))
            .text("keep-alive"),
    )
}
