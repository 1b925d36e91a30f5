// src/handlers/dashboard.rs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        dashboard::{CondominiumSummary, DashboardData, DemandEntry, KpiSnapshot, TopicEntry},
        period::{DateRange, Period, PeriodFilter},
        view::DashboardView,
    },
    services::presentation,
};

// ---
// Query: ?period=30days ou ?period=custom&startDate=...&endDate=...
// ---
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_range_params"))]
pub struct DashboardQuery {
    /// today, 7days, 30days, 90days, year ou custom. Valores desconhecidos viram 30days.
    #[param(example = "30days")]
    pub period: Option<String>,

    /// Início do intervalo (RFC 3339), só para `custom`.
    pub start_date: Option<DateTime<Utc>>,

    /// Fim do intervalo (RFC 3339), só para `custom`.
    pub end_date: Option<DateTime<Utc>>,
}

// startDate/endDate só são conferidos quando o período é `custom`.
fn validate_range_params(query: &DashboardQuery) -> Result<(), ValidationError> {
    if query.period() != Period::Custom {
        return Ok(());
    }
    match (query.start_date, query.end_date) {
        (Some(start), Some(end)) if start > end => {
            let mut err = ValidationError::new("range_order");
            err.message = Some("A data inicial deve ser anterior ou igual à data final.".into());
            Err(err)
        }
        (Some(_), None) | (None, Some(_)) => {
            let mut err = ValidationError::new("range_incomplete");
            err.message = Some("Informe startDate e endDate juntos.".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl DashboardQuery {
    fn period(&self) -> Period {
        self.period.as_deref().map(Period::from_token).unwrap_or_default()
    }

    pub fn to_filter(&self) -> Result<PeriodFilter, AppError> {
        let period = self.period();

        // O intervalo só vale para `custom`; nos demais períodos é ignorado.
        match (period, self.start_date, self.end_date) {
            (Period::Custom, Some(start), Some(end)) => {
                Ok(PeriodFilter::custom(DateRange::new(start, end)?))
            }
            _ => Ok(PeriodFilter::new(period)),
        }
    }
}

fn parse_filter(
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<PeriodFilter, AppError> {
    let Query(query) = query?;
    query.validate()?;
    query.to_filter()
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "KPIs, gráficos e condomínios do período", body = DashboardData),
        (status = 400, description = "Período personalizado inválido")
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query)?;

    let data = app_state.dashboard_service.get_dashboard(&filter).await?;

    Ok((StatusCode::OK, Json(data)))
}

// GET /api/dashboard/view
#[utoipa::path(
    get,
    path = "/api/dashboard/view",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard já formatado para a tela", body = DashboardView),
        (status = 400, description = "Período personalizado inválido")
    )
)]
pub async fn get_dashboard_view(
    State(app_state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query)?;

    let data = app_state.dashboard_service.get_dashboard(&filter).await?;

    Ok((StatusCode::OK, Json(presentation::build_view(&data))))
}

// GET /api/dashboard/kpis
#[utoipa::path(
    get,
    path = "/api/dashboard/kpis",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Cards de KPI do período", body = KpiSnapshot),
        (status = 400, description = "Período personalizado inválido")
    )
)]
pub async fn get_kpis(
    State(app_state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query)?;

    let kpis = app_state.dashboard_service.get_kpis(&filter).await?;

    Ok((StatusCode::OK, Json(kpis)))
}

// GET /api/dashboard/topics
#[utoipa::path(
    get,
    path = "/api/dashboard/topics",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Top 10 tópicos mais buscados", body = Vec<TopicEntry>),
        (status = 400, description = "Período personalizado inválido")
    )
)]
pub async fn get_top_topics(
    State(app_state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query)?;

    let topics = app_state.dashboard_service.get_top_topics(&filter).await?;

    Ok((StatusCode::OK, Json(topics)))
}

// GET /api/dashboard/demands
#[utoipa::path(
    get,
    path = "/api/dashboard/demands",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Demandas atendidas e não atendidas por dia (até 90 pontos)", body = Vec<DemandEntry>),
        (status = 400, description = "Período personalizado inválido")
    )
)]
pub async fn get_demand_timeline(
    State(app_state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query)?;

    let timeline = app_state.dashboard_service.get_demand_timeline(&filter).await?;

    Ok((StatusCode::OK, Json(timeline)))
}

// GET /api/dashboard/condominiums
#[utoipa::path(
    get,
    path = "/api/dashboard/condominiums",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Até 50 condomínios ordenados por atendimentos", body = Vec<CondominiumSummary>),
        (status = 400, description = "Período personalizado inválido")
    )
)]
pub async fn get_condominium_stats(
    State(app_state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query)?;

    let condominiums = app_state.dashboard_service.get_condominium_stats(&filter).await?;

    Ok((StatusCode::OK, Json(condominiums)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{self, Body},
        http::Request,
        Router,
    };
    use chrono::FixedOffset;
    use serde_json::{json, Value};
    use tower::ServiceExt; // for `oneshot`

    use crate::{
        db::stub_source::StubSource, models::dashboard::NpsReading, routes::create_router,
        services::DashboardService,
    };

    fn app(source: StubSource) -> Router {
        let service = DashboardService::new(Arc::new(source), FixedOffset::west_opt(3 * 3600).unwrap());
        create_router(AppState { dashboard_service: service })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn query_without_period_defaults_to_thirty_days() {
        let filter = DashboardQuery::default().to_filter().unwrap();
        assert_eq!(filter, PeriodFilter::new(Period::Last30Days));
    }

    #[test]
    fn half_open_custom_range_fails_validation() {
        let query = DashboardQuery {
            period: Some("custom".into()),
            start_date: Some(Utc::now()),
            end_date: None,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn range_is_not_checked_outside_custom() {
        let query = DashboardQuery {
            period: Some("7days".into()),
            start_date: Some(Utc::now()),
            end_date: None,
        };
        assert!(query.validate().is_ok());
        assert_eq!(query.to_filter().unwrap(), PeriodFilter::new(Period::Last7Days));
    }

    #[tokio::test]
    async fn named_period_ignores_an_inverted_range() {
        let (status, body) = get_json(
            app(StubSource::default()),
            "/api/dashboard?period=today&startDate=2026-03-01T00:00:00Z&endDate=2026-02-01T00:00:00Z",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "today");
    }

    #[tokio::test]
    async fn malformed_date_is_a_json_bad_request() {
        let (status, body) = get_json(
            app(StubSource::default()),
            "/api/dashboard/kpis?period=custom&startDate=ontem&endDate=2026-02-01T00:00:00Z",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Um ou mais parâmetros da consulta são inválidos.");
        assert!(body["details"]["query"][0].is_string());
    }

    #[tokio::test]
    async fn health_check_answers_ok() {
        let response = app(StubSource::default())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn dashboard_with_dead_backend_is_all_zero() {
        let (status, body) = get_json(app(StubSource::failing_everything()), "/api/dashboard?period=today").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "today");
        assert_eq!(
            body["kpis"],
            json!({
                "usuarios": { "total": 0, "change": 0 },
                "buscas": { "total": 0, "change": 0 },
                "nps": { "score": 0.0, "total": 0 },
                "interacoes": { "total": 0, "change": 0 },
            })
        );
        assert_eq!(body["topicos"], json!([]));
        assert_eq!(body["demandas"], json!([]));
        assert_eq!(body["condominios"], json!([]));
    }

    #[tokio::test]
    async fn unknown_period_is_served_as_thirty_days() {
        let (status, body) = get_json(app(StubSource::default()), "/api/dashboard?period=decada").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["period"], "30days");
    }

    #[tokio::test]
    async fn custom_period_without_dates_is_a_bad_request() {
        let (status, body) = get_json(app(StubSource::default()), "/api/dashboard?period=custom").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("custom"));
    }

    #[tokio::test]
    async fn custom_period_echoes_the_requested_range() {
        let (status, body) = get_json(
            app(StubSource::default()),
            "/api/dashboard?period=custom&startDate=2026-02-01T00:00:00Z&endDate=2026-02-28T23:59:59Z",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["range"]["startDate"], "2026-02-01T00:00:00Z");
        assert_eq!(body["range"]["endDate"], "2026-02-28T23:59:59Z");
    }

    #[tokio::test]
    async fn inverted_range_reports_validation_details() {
        let (status, body) = get_json(
            app(StubSource::default()),
            "/api/dashboard?period=custom&startDate=2026-03-01T00:00:00Z&endDate=2026-02-01T00:00:00Z",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Um ou mais campos são inválidos.");
        assert!(body["details"].is_object());
    }

    #[tokio::test]
    async fn view_endpoint_returns_formatted_tiles() {
        let source = StubSource {
            unique_users: Some(1234),
            nps: Some(NpsReading { nps_score: rust_decimal::Decimal::new(85, 1), total_respostas: 89 }),
            ..Default::default()
        };

        let (status, body) = get_json(app(source), "/api/dashboard/view?period=7days").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kpis"][0]["value"], "1.234");
        assert_eq!(body["kpis"][2]["value"], "8.5");
        assert_eq!(body["kpis"][2]["change"]["label"], "89 respostas");
        assert_eq!(body["periods"][1]["selected"], true);
        assert_eq!(
            body["condominios"]["emptyMessage"],
            "Nenhum condomínio encontrado para o período selecionado"
        );
    }

    #[tokio::test]
    async fn section_endpoints_answer_independently() {
        let source = StubSource {
            topics: vec![TopicEntry { topico: "Barulho".into(), total_buscas: 98 }],
            ..Default::default()
        }
        .fail("usuarios");
        let router = app(source);

        let (status, kpis) = get_json(router.clone(), "/api/dashboard/kpis").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(kpis["usuarios"]["total"], 0);

        let (_, topics) = get_json(router.clone(), "/api/dashboard/topics").await;
        assert_eq!(topics, json!([{ "topico": "Barulho", "totalBuscas": 98 }]));

        let (_, demands) = get_json(router.clone(), "/api/dashboard/demands").await;
        assert_eq!(demands, json!([]));

        let (status, _) = get_json(router, "/api/dashboard/condominiums?period=year").await;
        assert_eq!(status, StatusCode::OK);
    }
}
