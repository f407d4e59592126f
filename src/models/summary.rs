// src/models/summary.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, models::bills::BillType};

// --- Granularidade do período consultado ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeType {
    /// Ano inteiro; os baldes do gráfico de linha são meses ("YYYY-MM").
    Year,
    /// Um mês; os baldes são dias ("YYYY-MM-DD").
    Month,
}

impl TimeType {
    /// Formato chrono do rótulo de cada balde.
    pub fn bucket_format(self) -> &'static str {
        match self {
            TimeType::Year => "%Y-%m",
            TimeType::Month => "%Y-%m-%d",
        }
    }

    /// O mesmo formato, na sintaxe do `to_char` do Postgres.
    pub fn sql_bucket_pattern(self) -> &'static str {
        match self {
            TimeType::Year => "YYYY-MM",
            TimeType::Month => "YYYY-MM-DD",
        }
    }
}

impl FromStr for TimeType {
    type Err = AppError;

    // Aceita "YEAR"/"year" e "MONTH"/"month"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YEAR" => Ok(TimeType::Year),
            "MONTH" => Ok(TimeType::Month),
            _ => Err(AppError::InvalidArgument(format!(
                "time_type inválido: '{}'. Use YEAR ou MONTH.",
                s
            ))),
        }
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeType::Year => f.write_str("YEAR"),
            TimeType::Month => f.write_str("MONTH"),
        }
    }
}

// ---
// Query string comum aos três endpoints de resumo
// ---
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// `YEAR` ou `MONTH`
    #[validate(length(min = 1, message = "O campo 'time_type' é obrigatório."))]
    #[param(example = "YEAR")]
    pub time_type: String,

    /// `YYYY` ou `YYYY-MM`
    #[validate(length(min = 1, message = "O campo 'time_value' é obrigatório."))]
    #[param(example = "2023")]
    pub time_value: String,
}

// ---
// Especificação de consulta: filtros aplicados a todas as agregações
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillScope {
    pub owner_id: Uuid,
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub bill_type: Option<BillType>,
}

impl BillScope {
    /// Monta o filtro a partir do período pedido.
    /// YEAR exige "YYYY"; MONTH exige "YYYY-MM".
    pub fn resolve(owner_id: Uuid, time_type: TimeType, time_value: &str) -> Result<Self, AppError> {
        let (year, month) = match time_type {
            TimeType::Year => (parse_year(time_value)?, None),
            TimeType::Month => {
                let (year, month) = time_value.split_once('-').ok_or_else(|| {
                    AppError::InvalidArgument(format!(
                        "time_value '{}' deve estar no formato YYYY-MM.",
                        time_value
                    ))
                })?;
                (parse_year(year)?, Some(parse_month(month)?))
            }
        };

        Ok(Self {
            owner_id,
            year: Some(year),
            month,
            bill_type: None,
        })
    }

    pub fn with_bill_type(self, bill_type: BillType) -> Self {
        Self {
            bill_type: Some(bill_type),
            ..self
        }
    }
}

fn parse_year(value: &str) -> Result<i32, AppError> {
    match value.trim().parse::<i32>() {
        Ok(year) if (1..=9999).contains(&year) => Ok(year),
        _ => Err(AppError::InvalidArgument(format!("Ano inválido: '{}'.", value))),
    }
}

fn parse_month(value: &str) -> Result<i32, AppError> {
    match value.trim().parse::<i32>() {
        Ok(month) if (1..=12).contains(&month) => Ok(month),
        _ => Err(AppError::InvalidArgument(format!("Mês inválido: '{}'.", value))),
    }
}

// ---
// Linhas brutas das agregações
// ---

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TypeSum {
    pub bill_type: BillType,
    pub amount_sum: Decimal,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CategorySum {
    pub category_id: Uuid,
    pub amount_sum: Decimal,
}

// ---
// Respostas
// ---

// 1. Cards de resumo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SummaryInfo {
    #[schema(example = "2023-03")]
    pub time: String,
    #[schema(value_type = f64)]
    pub income_amount: Decimal,
    #[schema(value_type = f64)]
    pub outgo_amount: Decimal,
    #[schema(value_type = f64)]
    pub balance_amount: Decimal,
}

// 2. Gráfico de linha. A mesma forma serve para a linha agrupada pelo banco
// e para o ponto já preenchido.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct LineChartEntry {
    #[schema(example = "2023-03")]
    pub time: String,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LineChart {
    pub income: Vec<LineChartEntry>,
    pub outgo: Vec<LineChartEntry>,
}

// 3. Gráfico de rosca (distribuição por categoria)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RingChartEntry {
    #[schema(example = "Mercado")]
    pub category: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(example = 0.25)]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RingChart {
    pub income: Vec<RingChartEntry>,
    pub outgo: Vec<RingChartEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_type_is_case_insensitive() {
        assert_eq!("YEAR".parse::<TimeType>().unwrap(), TimeType::Year);
        assert_eq!("month".parse::<TimeType>().unwrap(), TimeType::Month);
    }

    #[test]
    fn unknown_time_type_is_an_invalid_argument() {
        let err = "WEEK".parse::<TimeType>().unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn year_scope_filters_only_by_year() {
        let owner = Uuid::new_v4();
        let scope = BillScope::resolve(owner, TimeType::Year, "2023").unwrap();
        assert_eq!(
            scope,
            BillScope { owner_id: owner, year: Some(2023), month: None, bill_type: None }
        );
    }

    #[test]
    fn month_scope_splits_year_and_month() {
        let owner = Uuid::new_v4();
        let scope = BillScope::resolve(owner, TimeType::Month, "2023-03").unwrap();
        assert_eq!(scope.year, Some(2023));
        assert_eq!(scope.month, Some(3));
        assert_eq!(scope.owner_id, owner);
    }

    #[test]
    fn malformed_time_values_are_rejected() {
        let owner = Uuid::new_v4();
        for (time_type, value) in [
            (TimeType::Year, "20x3"),
            (TimeType::Year, ""),
            (TimeType::Month, "2023"),
            (TimeType::Month, "2023-13"),
            (TimeType::Month, "2023-03-15"),
        ] {
            let result = BillScope::resolve(owner, time_type, value);
            assert!(
                matches!(result, Err(AppError::InvalidArgument(_))),
                "{} {:?} deveria falhar",
                time_type,
                value
            );
        }
    }

    // O rótulo que o `to_char` devolve tem que ser o mesmo que o `fill_time_series` gera
    #[test]
    fn sql_and_chrono_bucket_formats_agree() {
        let date = chrono::NaiveDate::from_ymd_opt(2023, 3, 7).unwrap();
        for (time_type, expected) in [(TimeType::Year, "2023-03"), (TimeType::Month, "2023-03-07")] {
            let as_chrono = time_type
                .sql_bucket_pattern()
                .replace("YYYY", "%Y")
                .replace("MM", "%m")
                .replace("DD", "%d");
            assert_eq!(as_chrono, time_type.bucket_format());
            assert_eq!(date.format(time_type.bucket_format()).to_string(), expected);
        }
    }

    #[test]
    fn with_bill_type_keeps_period() {
        let scope = BillScope::resolve(Uuid::new_v4(), TimeType::Month, "2024-02")
            .unwrap()
            .with_bill_type(BillType::Income);
        assert_eq!(scope.bill_type, Some(BillType::Income));
        assert_eq!(scope.month, Some(2));
    }
}
