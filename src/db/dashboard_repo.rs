// src/db/dashboard_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{CondominiumSummary, DemandEntry, NpsReading, TopicEntry},
        period::DateRange,
    },
};

/// Leituras que o dashboard faz nas views pré-agregadas do banco.
///
/// As contagens "mais recentes" devolvem `None` quando nenhuma linha cai no
/// intervalo. Os métodos de lista recebem o `limit` que a view deve respeitar.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn latest_unique_users(&self, range: &DateRange) -> Result<Option<i64>, AppError>;

    async fn latest_searches(&self, range: &DateRange) -> Result<Option<i64>, AppError>;

    async fn latest_nps(&self, range: &DateRange) -> Result<Option<NpsReading>, AppError>;

    async fn latest_syndic_interactions(&self, range: &DateRange) -> Result<Option<i64>, AppError>;

    async fn top_topics(&self, range: &DateRange, limit: i64) -> Result<Vec<TopicEntry>, AppError>;

    async fn demand_timeline(&self, range: &DateRange, limit: i64) -> Result<Vec<DemandEntry>, AppError>;

    async fn condominium_stats(
        &self,
        range: &DateRange,
        limit: i64,
    ) -> Result<Vec<CondominiumSummary>, AppError>;
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Views de contagem por período: pega a linha mais recente dentro do intervalo.
    // `view` e `column` são sempre constantes deste arquivo.
    async fn latest_count(
        &self,
        view: &'static str,
        column: &'static str,
        range: &DateRange,
    ) -> Result<Option<i64>, AppError> {
        let sql = format!(
            r#"
            SELECT {column}::bigint
            FROM {view}
            WHERE periodo >= $1
              AND periodo <= $2
            ORDER BY periodo DESC
            LIMIT 1
            "#
        );

        let total = sqlx::query_scalar::<_, Option<i64>>(&sql)
            .bind(range.start_date)
            .bind(range.end_date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(total.flatten())
    }
}

#[async_trait]
impl MetricsSource for DashboardRepository {
    async fn latest_unique_users(&self, range: &DateRange) -> Result<Option<i64>, AppError> {
        self.latest_count("vw_usuarios_unicos_periodo", "total_usuarios", range)
            .await
    }

    async fn latest_searches(&self, range: &DateRange) -> Result<Option<i64>, AppError> {
        self.latest_count("vw_buscas_paragrafos_periodo", "total_buscas", range)
            .await
    }

    async fn latest_nps(&self, range: &DateRange) -> Result<Option<NpsReading>, AppError> {
        let reading = sqlx::query_as::<_, NpsReading>(
            r#"
            SELECT
                COALESCE(nps_score, 0)::numeric AS nps_score,
                COALESCE(total_respostas, 0)::bigint AS total_respostas
            FROM vw_nps_geral
            WHERE data_inicio >= $1
              AND data_fim <= $2
            ORDER BY data_fim DESC
            LIMIT 1
            "#,
        )
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn latest_syndic_interactions(&self, range: &DateRange) -> Result<Option<i64>, AppError> {
        self.latest_count("vw_interacoes_sindicos", "total_interacoes", range)
            .await
    }

    async fn top_topics(&self, range: &DateRange, limit: i64) -> Result<Vec<TopicEntry>, AppError> {
        let data = sqlx::query_as::<_, TopicEntry>(
            r#"
            SELECT
                topico,
                COALESCE(total_buscas, 0)::bigint AS total_buscas
            FROM vw_top_topicos
            WHERE periodo >= $1
              AND periodo <= $2
            ORDER BY total_buscas DESC
            LIMIT $3
            "#,
        )
        .bind(range.start_date)
        .bind(range.end_date)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    async fn demand_timeline(&self, range: &DateRange, limit: i64) -> Result<Vec<DemandEntry>, AppError> {
        let data = sqlx::query_as::<_, DemandEntry>(
            r#"
            SELECT
                data::date AS data,
                COALESCE(atendidas, 0)::bigint AS atendidas,
                COALESCE(nao_atendidas, 0)::bigint AS nao_atendidas
            FROM vw_demandas_atendimento
            WHERE data >= $1
              AND data <= $2
            ORDER BY data ASC
            LIMIT $3
            "#,
        )
        .bind(range.start_date)
        .bind(range.end_date)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }

    async fn condominium_stats(
        &self,
        range: &DateRange,
        limit: i64,
    ) -> Result<Vec<CondominiumSummary>, AppError> {
        let data = sqlx::query_as::<_, CondominiumSummary>(
            r#"
            SELECT
                condominio_id::bigint AS condominio_id,
                nome_condominio,
                COALESCE(total_atendimentos, 0)::bigint AS total_atendimentos,
                nps_medio::numeric AS nps_medio,
                COALESCE(ativo, false) AS ativo
            FROM vw_dashboard_condominio
            WHERE periodo_inicio >= $1
              AND periodo_fim <= $2
            ORDER BY total_atendimentos DESC
            LIMIT $3
            "#,
        )
        .bind(range.start_date)
        .bind(range.end_date)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(data)
    }
}
