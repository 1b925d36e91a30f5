// src/models/view.rs
//
// Modelos já formatados para a tela: cards, gráficos e tabela.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::period::{DateRange, Period};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChangeBadge {
    pub value: Decimal,
    #[schema(example = "+12%")]
    pub text: String,
    pub tone: Tone,
    #[schema(example = "vs. período anterior")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct KpiTile {
    #[schema(example = "Usuários Únicos")]
    pub title: String,
    #[schema(example = "1.234")]
    pub value: String,
    pub icon: String,
    pub change: Option<ChangeBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PeriodOption {
    pub value: Period,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicBar {
    /// Rótulo do eixo, possivelmente truncado.
    pub topico: String,
    pub full_topico: String,
    pub buscas: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicsChart {
    pub title: String,
    pub description: String,
    pub bars: Vec<TopicBar>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandPoint {
    #[schema(example = "05/01")]
    pub date: String,
    #[schema(example = "05/01/2026")]
    pub full_date: String,
    pub atendidas: i64,
    pub nao_atendidas: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemandChart {
    pub title: String,
    pub description: String,
    pub points: Vec<DemandPoint>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CondominiumRow {
    pub condominio_id: i64,
    pub nome: String,
    pub atendimentos: String,
    #[schema(example = "8.5")]
    pub nps_medio: String,
    pub ativo: bool,
    #[schema(example = "/condominios/1")]
    pub details_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CondominiumTable {
    pub title: String,
    pub description: String,
    pub rows: Vec<CondominiumRow>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub period: Period,
    pub periods: Vec<PeriodOption>,
    pub range: DateRange,
    pub kpis: Vec<KpiTile>,
    pub demandas: DemandChart,
    pub topicos: TopicsChart,
    pub condominios: CondominiumTable,
}
