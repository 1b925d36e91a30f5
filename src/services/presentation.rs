// src/services/presentation.rs
//
// Transforma `DashboardData` no que a tela desenha. Só formatação.

use rust_decimal::Decimal;

use crate::{
    common::format::{
        format_change, format_full_date, format_integer_pt_br, format_one_decimal,
        format_short_date, truncate_label,
    },
    models::{
        dashboard::{CondominiumSummary, CountMetric, DashboardData, DemandEntry, KpiSnapshot, TopicEntry},
        period::Period,
        view::{
            ChangeBadge, CondominiumRow, CondominiumTable, DashboardView, DemandChart, DemandPoint,
            KpiTile, PeriodOption, TopicBar, TopicsChart,
        },
    },
};

const TOPIC_LABEL_MAX_CHARS: usize = 20;
const PREVIOUS_PERIOD_LABEL: &str = "vs. período anterior";
const EMPTY_CHART_MESSAGE: &str = "Nenhum dado disponível para o período selecionado";
const EMPTY_TABLE_MESSAGE: &str = "Nenhum condomínio encontrado para o período selecionado";

pub fn build_view(data: &DashboardData) -> DashboardView {
    DashboardView {
        period: data.period,
        periods: period_options(data.period),
        range: data.range,
        kpis: kpi_tiles(&data.kpis),
        demandas: demand_chart(&data.demandas),
        topicos: topics_chart(&data.topicos),
        condominios: condominium_table(&data.condominios),
    }
}

pub fn period_options(selected: Period) -> Vec<PeriodOption> {
    Period::FILTER_OPTIONS
        .iter()
        .map(|p| PeriodOption {
            value: *p,
            label: p.label().to_string(),
            selected: *p == selected,
        })
        .collect()
}

fn change_badge(value: Decimal, label: String) -> ChangeBadge {
    let (text, tone) = format_change(value);
    ChangeBadge { value, text, tone, label }
}

fn count_tile(title: &str, icon: &str, metric: &CountMetric) -> KpiTile {
    KpiTile {
        title: title.to_string(),
        value: format_integer_pt_br(metric.total),
        icon: icon.to_string(),
        change: Some(change_badge(Decimal::from(metric.change), PREVIOUS_PERIOD_LABEL.to_string())),
    }
}

pub fn kpi_tiles(kpis: &KpiSnapshot) -> Vec<KpiTile> {
    // Sem respostas no período, o card de NPS não mostra selo.
    let nps_change = (kpis.nps.total > 0)
        .then(|| change_badge(Decimal::ZERO, format!("{} respostas", kpis.nps.total)));

    vec![
        count_tile("Usuários Únicos", "users", &kpis.usuarios),
        count_tile("Buscas RAG", "bar-chart-3", &kpis.buscas),
        KpiTile {
            title: "NPS Médio".to_string(),
            value: format_one_decimal(kpis.nps.score),
            icon: "thumbs-up".to_string(),
            change: nps_change,
        },
        count_tile("Interações Síndicos", "message-square", &kpis.interacoes),
    ]
}

pub fn topics_chart(topics: &[TopicEntry]) -> TopicsChart {
    let bars: Vec<TopicBar> = topics
        .iter()
        .map(|t| TopicBar {
            topico: truncate_label(&t.topico, TOPIC_LABEL_MAX_CHARS),
            full_topico: t.topico.clone(),
            buscas: t.total_buscas,
        })
        .collect();

    let (description, empty_message) = if bars.is_empty() {
        (
            "Os 10 tópicos mais buscados no período".to_string(),
            Some(EMPTY_CHART_MESSAGE.to_string()),
        )
    } else {
        (format!("Os {} tópicos mais buscados no período", bars.len()), None)
    };

    TopicsChart {
        title: "Top Tópicos".to_string(),
        description,
        bars,
        empty_message,
    }
}

pub fn demand_chart(demands: &[DemandEntry]) -> DemandChart {
    let points: Vec<DemandPoint> = demands
        .iter()
        .map(|d| DemandPoint {
            date: format_short_date(d.data),
            full_date: format_full_date(d.data),
            atendidas: d.atendidas,
            nao_atendidas: d.nao_atendidas,
        })
        .collect();

    DemandChart {
        title: "Demandas no Período".to_string(),
        description: "Evolução de demandas atendidas e não atendidas".to_string(),
        empty_message: points.is_empty().then(|| EMPTY_CHART_MESSAGE.to_string()),
        points,
    }
}

pub fn condominium_table(condominiums: &[CondominiumSummary]) -> CondominiumTable {
    let rows: Vec<CondominiumRow> = condominiums
        .iter()
        .map(|c| CondominiumRow {
            condominio_id: c.condominio_id,
            nome: c.nome_condominio.clone(),
            atendimentos: format_integer_pt_br(c.total_atendimentos),
            nps_medio: match c.nps_medio {
                Some(nps) if !nps.is_zero() => format_one_decimal(nps),
                _ => "-".to_string(),
            },
            ativo: c.ativo,
            details_href: format!("/condominios/{}", c.condominio_id),
        })
        .collect();

    let (description, empty_message) = if rows.is_empty() {
        (
            "Resumo de métricas por condomínio".to_string(),
            Some(EMPTY_TABLE_MESSAGE.to_string()),
        )
    } else {
        ("Resumo de métricas por condomínio no período".to_string(), None)
    };

    CondominiumTable {
        title: "Condomínios".to_string(),
        description,
        rows,
        empty_message,
    }
}
