//! HTTP surface for the RTRWH advisor
//!
//! Serves the server-rendered page and the form post-back. The browser's
//! native constraint validation guards normal submissions; a post that
//! bypasses it with blank or malformed numerics is rejected by the form
//! extractor before the controller sees anything.

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::controller::ReportController;
use crate::models::{PropertyProfile, SoilType};
use crate::render::render_page;

/// =============================
/// Request Models
/// =============================

/// Form post-back body. Field names match the page's input names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub name: String,
    pub location: String,
    pub soil_type: SoilType,
    pub dwellers: u32,
    pub roof_area: f64,
    pub open_space: f64,
}

impl From<ReportRequest> for PropertyProfile {
    fn from(req: ReportRequest) -> Self {
        Self {
            name: req.name,
            location: req.location,
            soil_type: req.soil_type,
            dwellers: req.dwellers,
            roof_area_m2: req.roof_area,
            open_space_m2: req.open_space,
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub controller: Arc<ReportController>,
}

/// =============================
/// Handlers
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn index(State(state): State<ApiState>) -> Html<String> {
    let snapshot = state.controller.state().await;
    Html(render_page(&snapshot))
}

/// Run one submission to completion and respond with the settled page.
async fn submit_report(
    State(state): State<ApiState>,
    Form(req): Form<ReportRequest>,
) -> Html<String> {
    info!("Received report request for '{}'", req.location);

    state.controller.submit(req.into()).await;
    let snapshot = state.controller.state().await;
    Html(render_page(&snapshot))
}

/// =============================
/// Router
/// =============================

pub fn create_router(controller: Arc<ReportController>) -> Router {
    let state = ApiState { controller };

    Router::new()
        .route("/", get(index))
        .route("/report", post(submit_report))
        .route("/health", get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    controller: Arc<ReportController>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(controller);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("RTRWH Advisor listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ReportStatus;
    use crate::gemini::AnalysisProvider;
    use crate::models::test_fixtures::sample_report;
    use crate::models::AnalysisReport;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    struct AlwaysSucceeds;

    #[async_trait]
    impl AnalysisProvider for AlwaysSucceeds {
        async fn analyze(&self, _profile: &PropertyProfile) -> crate::Result<AnalysisReport> {
            Ok(sample_report())
        }
    }

    fn test_app() -> (Arc<ReportController>, Router) {
        let controller = Arc::new(ReportController::new(Arc::new(AlwaysSucceeds)));
        let router = create_router(controller.clone());
        (controller, router)
    }

    async fn body_text(body: Body) -> String {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const VALID_FORM: &str =
        "name=Jane+Doe&location=Austin%2C+TX&soilType=Sand&dwellers=4&roofArea=100&openSpace=50";

    #[tokio::test]
    async fn test_index_renders_placeholder_for_fresh_session() {
        let (_, router) = test_app();

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response.into_body()).await;
        assert!(page.contains("class=\"placeholder\""));
        assert!(page.contains("Generate Report"));
    }

    #[tokio::test]
    async fn test_valid_submission_renders_report() {
        let (controller, router) = test_app();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/report")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(VALID_FORM))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response.into_body()).await;
        assert!(page.contains("class=\"report\""));
        assert!(page.contains("Recharge Pit"));

        let state = controller.state().await;
        assert_eq!(state.status, ReportStatus::Succeeded);
        assert_eq!(state.input.location, "Austin, TX");
    }

    #[tokio::test]
    async fn test_blank_numeric_is_rejected_before_any_transition() {
        let (controller, router) = test_app();

        let body = "name=Jane&location=Austin&soilType=Sand&dwellers=4&roofArea=&openSpace=50";
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/report")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(controller.state().await.status, ReportStatus::Idle);
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let (_, router) = test_app();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value =
            serde_json::from_str(&body_text(response.into_body()).await).unwrap();
        assert_eq!(body["status"], "healthy");
    }
}
