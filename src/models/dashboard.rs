// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::period::{DateRange, Period};

// 1. KPIs (Os Cards do Topo)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct CountMetric {
    pub total: i64,
    /// Variação percentual, em pontos inteiros, contra o período anterior.
    pub change: i64,
}

impl CountMetric {
    pub fn new(total: i64) -> Self {
        Self { total, change: 0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct NpsMetric {
    pub score: Decimal,
    pub total: i64,
}

/// Cada campo vem de uma leitura independente e fica zerado se ela falhar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct KpiSnapshot {
    pub usuarios: CountMetric,
    pub buscas: CountMetric,
    pub nps: NpsMetric,
    pub interacoes: CountMetric,
}

// Linha de vw_nps_geral
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct NpsReading {
    pub nps_score: Decimal,
    pub total_respostas: i64,
}

// 2. Ranking de Tópicos
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicEntry {
    #[schema(example = "Barulho")]
    pub topico: String,
    pub total_buscas: i64,
}

// 3. Evolução de Demandas
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandEntry {
    pub data: NaiveDate,
    pub atendidas: i64,
    pub nao_atendidas: i64,
}

// 4. Resumo por Condomínio
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CondominiumSummary {
    pub condominio_id: i64,
    #[schema(example = "Residencial Jardim das Flores")]
    pub nome_condominio: String,
    pub total_atendimentos: i64,
    pub nps_medio: Option<Decimal>,
    pub ativo: bool,
}

/// Tudo o que uma renderização do dashboard precisa, já ordenado e limitado.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub period: Period,
    pub range: DateRange,
    pub kpis: KpiSnapshot,
    pub topicos: Vec<TopicEntry>,
    pub demandas: Vec<DemandEntry>,
    pub condominios: Vec<CondominiumSummary>,
}
