// src/models/period.rs

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::error::AppError;

/// Período selecionado no filtro do dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Period {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7days")]
    Last7Days,
    #[default]
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "custom")]
    Custom,
}

impl Period {
    /// Abas exibidas no filtro, na ordem da tela. `custom` não tem aba própria.
    pub const FILTER_OPTIONS: [Period; 5] = [
        Period::Today,
        Period::Last7Days,
        Period::Last30Days,
        Period::Last90Days,
        Period::Year,
    ];

    /// Converte o token recebido da UI. Tokens desconhecidos caem em `30days`.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "today" => Period::Today,
            "7days" => Period::Last7Days,
            "30days" => Period::Last30Days,
            "90days" => Period::Last90Days,
            "year" => Period::Year,
            "custom" => Period::Custom,
            _ => Period::Last30Days,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Last7Days => "7days",
            Period::Last30Days => "30days",
            Period::Last90Days => "90days",
            Period::Year => "year",
            Period::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Hoje",
            Period::Last7Days => "7 dias",
            Period::Last30Days => "30 dias",
            Period::Last90Days => "90 dias",
            Period::Year => "Este ano",
            Period::Custom => "Personalizado",
        }
    }

    fn days_back(&self) -> Option<i64> {
        match self {
            Period::Last7Days => Some(7),
            Period::Last30Days => Some(30),
            Period::Last90Days => Some(90),
            _ => None,
        }
    }
}

/// Intervalo fechado `[start_date, end_date]` em UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<Self, AppError> {
        if start_date > end_date {
            return Err(AppError::InvalidDateRange);
        }
        Ok(Self { start_date, end_date })
    }
}

/// O que a UI pede: um período e, só para `custom`, o intervalo explícito.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    pub period: Period,
    pub custom_range: Option<DateRange>,
}

impl PeriodFilter {
    pub fn new(period: Period) -> Self {
        Self { period, custom_range: None }
    }

    pub fn custom(range: DateRange) -> Self {
        Self { period: Period::Custom, custom_range: Some(range) }
    }

    /// Resolve o período em um intervalo ancorado em `now`.
    ///
    /// "Hoje" é o dia civil de `now` no fuso dele; o fim é sempre o último
    /// milissegundo desse dia. O intervalo personalizado só é lido para `custom`.
    pub fn resolve_at(&self, now: DateTime<FixedOffset>) -> Result<DateRange, AppError> {
        let offset = *now.offset();
        let today = now.date_naive();
        let end_date = end_of_day(today, &offset)?;

        let start_date = match self.period {
            Period::Today => start_of_day(today, &offset)?,
            Period::Year => {
                let first_day = today
                    .with_ordinal(1)
                    .ok_or_else(|| anyhow::anyhow!("Ano sem 1º de janeiro: {}", today.year()))?;
                start_of_day(first_day, &offset)?
            }
            Period::Custom => {
                let range = self.custom_range.ok_or(AppError::CustomRangeRequired)?;
                return DateRange::new(range.start_date, range.end_date);
            }
            period => {
                let days = period.days_back().unwrap_or(30);
                start_of_day(today - Duration::days(days), &offset)?
            }
        };

        DateRange::new(start_date, end_date)
    }
}

fn start_of_day(date: NaiveDate, offset: &FixedOffset) -> Result<DateTime<Utc>, AppError> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Data fora do intervalo suportado: {}", date))?;
    let utc = midnight - Duration::seconds(i64::from(offset.local_minus_utc()));
    Ok(utc.and_utc())
}

fn end_of_day(date: NaiveDate, offset: &FixedOffset) -> Result<DateTime<Utc>, AppError> {
    Ok(start_of_day(date, offset)? + Duration::days(1) - Duration::milliseconds(1))
}
