//! HTTP surface of the dashboard.
//!
//! Endpoints:
//! - `GET /`: the dashboard page
//! - `GET /api/layout`: control configuration (site options, slider bounds)
//! - `POST /api/update`: control values in, affected chart figures out
//! - `GET /health`: liveness check

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::chart::ChartSpec;
use crate::controls::ControlPanel;
use crate::data::filter::{FilterState, PayloadRange, SiteSelection};
use crate::page::INDEX_HTML;
use crate::reactive::{ControlId, OutputId};
use crate::state::AppContext;

/// Body of `POST /api/update`: the control that changed plus the current
/// value of every control.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub changed: Option<ControlId>,
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/layout", get(layout_handler))
        .route("/api/update", post(update_handler))
        .route("/health", get(health_handler))
        .with_state(ctx)
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(addr: SocketAddr, ctx: Arc<AppContext>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    log::info!("Dashboard running at http://{addr}");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    log::info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutdown signal received");
}

// API handlers

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn layout_handler(State(ctx): State<Arc<AppContext>>) -> Json<ControlPanel> {
    Json(ctx.controls.clone())
}

async fn update_handler(
    State(ctx): State<Arc<AppContext>>,
    Json(req): Json<UpdateRequest>,
) -> Json<BTreeMap<OutputId, ChartSpec>> {
    let state = FilterState {
        site: req.site,
        payload: req.payload,
    };
    Json(ctx.update(req.changed, state))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::example_dataset;

    fn context() -> Arc<AppContext> {
        Arc::new(AppContext::new(example_dataset()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_contains_controls() {
        let Html(page) = index_handler().await;
        assert!(page.contains("site-dropdown"));
        assert!(page.contains("payload-slider"));
        assert!(page.contains("success-pie-chart"));
        assert!(page.contains("success-payload-scatter-chart"));
    }

    #[tokio::test]
    async fn test_layout_endpoint() {
        let Json(panel) = layout_handler(State(context())).await;
        let value = serde_json::to_value(&panel).unwrap();
        assert_eq!(value["site"]["value"], "ALL");
        assert_eq!(value["site"]["options"][1]["value"], "siteA");
        assert_eq!(value["payload"]["step"], 1000.0);
        assert_eq!(value["payload"]["value"], serde_json::json!([500.0, 2000.0]));
    }

    #[tokio::test]
    async fn test_update_endpoint_routes_by_changed_control() {
        let req: UpdateRequest = serde_json::from_str(
            r#"{"changed": "payload-slider", "site": "siteA", "payload": [0, 1000]}"#,
        )
        .unwrap();
        let Json(charts) = update_handler(State(context()), Json(req)).await;

        assert_eq!(charts.len(), 1);
        let scatter = &charts[&OutputId::SuccessPayloadScatterChart];
        assert_eq!(scatter.points(), vec![(500.0, 0)]);

        let value = serde_json::to_value(&charts).unwrap();
        assert!(value.get("success-payload-scatter-chart").is_some());
    }

    #[tokio::test]
    async fn test_initial_update_renders_all_outputs() {
        let req: UpdateRequest =
            serde_json::from_str(r#"{"site": "ALL", "payload": [500, 2000]}"#).unwrap();
        let Json(charts) = update_handler(State(context()), Json(req)).await;
        assert_eq!(charts.len(), 2);
        assert_eq!(
            charts[&OutputId::SuccessPieChart].segments(),
            vec![("Failed", 1), ("Success", 2)]
        );
    }
}
