// src/routes.rs

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn create_router(app_state: AppState) -> Router {
    let dashboard_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/dashboard/view", get(handlers::dashboard::get_dashboard_view))
        .route("/api/dashboard/kpis", get(handlers::dashboard::get_kpis))
        .route("/api/dashboard/topics", get(handlers::dashboard::get_top_topics))
        .route("/api/dashboard/demands", get(handlers::dashboard::get_demand_timeline))
        .route("/api/dashboard/condominiums", get(handlers::dashboard::get_condominium_stats));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
