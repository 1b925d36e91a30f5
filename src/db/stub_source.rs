// src/db/stub_source.rs
//
// Fonte em memória para os testes: devolve dados fixos e falha sob demanda.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::MetricsSource,
    models::{
        dashboard::{CondominiumSummary, DemandEntry, NpsReading, TopicEntry},
        period::DateRange,
    },
};

pub const ALL_READS: [&str; 7] = [
    "usuarios",
    "buscas",
    "nps",
    "interacoes",
    "topicos",
    "demandas",
    "condominios",
];

#[derive(Default)]
pub struct StubSource {
    pub unique_users: Option<i64>,
    pub searches: Option<i64>,
    pub nps: Option<NpsReading>,
    pub interactions: Option<i64>,
    pub topics: Vec<TopicEntry>,
    pub demands: Vec<DemandEntry>,
    pub condominiums: Vec<CondominiumSummary>,
    pub failing: HashSet<&'static str>,
    pub seen_ranges: Mutex<Vec<DateRange>>,
    pub seen_limits: Mutex<Vec<(&'static str, i64)>>,
}

impl StubSource {
    pub fn failing_everything() -> Self {
        Self {
            failing: ALL_READS.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn fail(mut self, read: &'static str) -> Self {
        self.failing.insert(read);
        self
    }

    fn read(&self, name: &'static str, range: &DateRange) -> Result<(), AppError> {
        self.seen_ranges.lock().unwrap().push(*range);
        if self.failing.contains(name) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn read_list(&self, name: &'static str, range: &DateRange, limit: i64) -> Result<(), AppError> {
        self.seen_limits.lock().unwrap().push((name, limit));
        self.read(name, range)
    }
}

#[async_trait]
impl MetricsSource for StubSource {
    async fn latest_unique_users(&self, range: &DateRange) -> Result<Option<i64>, AppError> {
        self.read("usuarios", range)?;
        Ok(self.unique_users)
    }

    async fn latest_searches(&self, range: &DateRange) -> Result<Option<i64>, AppError> {
        self.read("buscas", range)?;
        Ok(self.searches)
    }

    async fn latest_nps(&self, range: &DateRange) -> Result<Option<NpsReading>, AppError> {
        self.read("nps", range)?;
        Ok(self.nps)
    }

    async fn latest_syndic_interactions(&self, range: &DateRange) -> Result<Option<i64>, AppError> {
        self.read("interacoes", range)?;
        Ok(self.interactions)
    }

    async fn top_topics(&self, range: &DateRange, limit: i64) -> Result<Vec<TopicEntry>, AppError> {
        self.read_list("topicos", range, limit)?;
        Ok(self.topics.clone())
    }

    async fn demand_timeline(&self, range: &DateRange, limit: i64) -> Result<Vec<DemandEntry>, AppError> {
        self.read_list("demandas", range, limit)?;
        Ok(self.demands.clone())
    }

    async fn condominium_stats(
        &self,
        range: &DateRange,
        limit: i64,
    ) -> Result<Vec<CondominiumSummary>, AppError> {
        self.read_list("condominios", range, limit)?;
        Ok(self.condominiums.clone())
    }
}
