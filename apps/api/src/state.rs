use crate::llm_client::ModelGateway;
use crate::roadmap::RoadmapSettings;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub gateway: ModelGateway,
    pub roadmap: RoadmapSettings,
}
