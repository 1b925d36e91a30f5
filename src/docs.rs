// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_dashboard_view,
        handlers::dashboard::get_kpis,
        handlers::dashboard::get_top_topics,
        handlers::dashboard::get_demand_timeline,
        handlers::dashboard::get_condominium_stats,
    ),
    components(
        schemas(
            // --- PERÍODO ---
            models::period::Period,
            models::period::DateRange,

            // --- DADOS ---
            models::dashboard::CountMetric,
            models::dashboard::NpsMetric,
            models::dashboard::KpiSnapshot,
            models::dashboard::TopicEntry,
            models::dashboard::DemandEntry,
            models::dashboard::CondominiumSummary,
            models::dashboard::DashboardData,

            // --- TELA ---
            models::view::Tone,
            models::view::ChangeBadge,
            models::view::KpiTile,
            models::view::PeriodOption,
            models::view::TopicBar,
            models::view::TopicsChart,
            models::view::DemandPoint,
            models::view::DemandChart,
            models::view::CondominiumRow,
            models::view::CondominiumTable,
            models::view::DashboardView,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores, gráficos e resumo por condomínio")
    )
)]
pub struct ApiDoc;
