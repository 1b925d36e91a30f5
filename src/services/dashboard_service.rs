// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{FixedOffset, Utc};

use crate::{
    common::error::AppError,
    db::MetricsSource,
    models::{
        dashboard::{
            CondominiumSummary, CountMetric, DashboardData, DemandEntry, KpiSnapshot, NpsMetric,
            TopicEntry,
        },
        period::{DateRange, PeriodFilter},
    },
};

pub const TOP_TOPICS_LIMIT: usize = 10;
pub const DEMAND_TIMELINE_LIMIT: usize = 90;
pub const CONDOMINIUM_STATS_LIMIT: usize = 50;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn MetricsSource>,
    utc_offset: FixedOffset,
}

impl DashboardService {
    pub fn new(source: Arc<dyn MetricsSource>, utc_offset: FixedOffset) -> Self {
        Self { source, utc_offset }
    }

    /// Resolve o filtro contra o relógio atual, no fuso do dashboard.
    pub fn resolve_period(&self, filter: &PeriodFilter) -> Result<DateRange, AppError> {
        filter.resolve_at(Utc::now().with_timezone(&self.utc_offset))
    }

    // Os quatro métodos públicos abaixo só falham na resolução do período.
    // Falhas de leitura viram valor zerado (e um log).

    pub async fn get_kpis(&self, filter: &PeriodFilter) -> Result<KpiSnapshot, AppError> {
        let range = self.resolve_period(filter)?;
        Ok(self.kpis_for(&range).await)
    }

    pub async fn get_top_topics(&self, filter: &PeriodFilter) -> Result<Vec<TopicEntry>, AppError> {
        let range = self.resolve_period(filter)?;
        Ok(self.top_topics_for(&range).await)
    }

    pub async fn get_demand_timeline(&self, filter: &PeriodFilter) -> Result<Vec<DemandEntry>, AppError> {
        let range = self.resolve_period(filter)?;
        Ok(self.demand_timeline_for(&range).await)
    }

    pub async fn get_condominium_stats(
        &self,
        filter: &PeriodFilter,
    ) -> Result<Vec<CondominiumSummary>, AppError> {
        let range = self.resolve_period(filter)?;
        Ok(self.condominium_stats_for(&range).await)
    }

    /// Monta o dashboard inteiro. O período é resolvido uma vez, antes de
    /// qualquer leitura; as quatro consultas rodam em paralelo sobre o mesmo intervalo.
    pub async fn get_dashboard(&self, filter: &PeriodFilter) -> Result<DashboardData, AppError> {
        let range = self.resolve_period(filter)?;
        tracing::debug!(
            "Montando dashboard para {} ({} a {})",
            filter.period.as_str(),
            range.start_date,
            range.end_date
        );

        let (kpis, topicos, demandas, condominios) = tokio::join!(
            self.kpis_for(&range),
            self.top_topics_for(&range),
            self.demand_timeline_for(&range),
            self.condominium_stats_for(&range),
        );

        Ok(DashboardData {
            period: filter.period,
            range,
            kpis,
            topicos,
            demandas,
            condominios,
        })
    }

    async fn kpis_for(&self, range: &DateRange) -> KpiSnapshot {
        let (usuarios, buscas, nps, interacoes) = tokio::join!(
            self.source.latest_unique_users(range),
            self.source.latest_searches(range),
            self.source.latest_nps(range),
            self.source.latest_syndic_interactions(range),
        );

        let nps = or_log("NPS geral", nps).flatten();

        KpiSnapshot {
            usuarios: CountMetric::new(or_log("usuários únicos", usuarios).flatten().unwrap_or(0)),
            buscas: CountMetric::new(or_log("buscas", buscas).flatten().unwrap_or(0)),
            nps: nps
                .map(|n| NpsMetric { score: n.nps_score, total: n.total_respostas })
                .unwrap_or_default(),
            interacoes: CountMetric::new(
                or_log("interações de síndicos", interacoes).flatten().unwrap_or(0),
            ),
        }
    }

    async fn top_topics_for(&self, range: &DateRange) -> Vec<TopicEntry> {
        let result = self.source.top_topics(range, TOP_TOPICS_LIMIT as i64).await;
        let mut topics = or_log("top tópicos", result).unwrap_or_default();

        topics.sort_by(|a, b| b.total_buscas.cmp(&a.total_buscas));
        topics.truncate(TOP_TOPICS_LIMIT);
        topics
    }

    async fn demand_timeline_for(&self, range: &DateRange) -> Vec<DemandEntry> {
        let result = self.source.demand_timeline(range, DEMAND_TIMELINE_LIMIT as i64).await;
        let mut demands = or_log("timeline de demandas", result).unwrap_or_default();

        demands.sort_by_key(|d| d.data);
        demands.truncate(DEMAND_TIMELINE_LIMIT);
        demands
    }

    async fn condominium_stats_for(&self, range: &DateRange) -> Vec<CondominiumSummary> {
        let result = self.source.condominium_stats(range, CONDOMINIUM_STATS_LIMIT as i64).await;
        let mut condominiums = or_log("stats de condomínios", result).unwrap_or_default();

        condominiums.sort_by(|a, b| b.total_atendimentos.cmp(&a.total_atendimentos));
        condominiums.truncate(CONDOMINIUM_STATS_LIMIT);
        condominiums
    }
}

fn or_log<T>(metric: &str, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("Erro ao buscar {}: {}", metric, e);
            None
        }
    }
}
