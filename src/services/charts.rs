// src/services/charts.rs
//
// Pós-processamento das agregações: transforma as linhas que vêm do banco
// nas séries prontas para os gráficos do front.

use anyhow::anyhow;
use chrono::{Datelike, NaiveDate};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        bills::BillType,
        summary::{CategorySum, LineChartEntry, RingChartEntry, SummaryInfo, TimeType, TypeSum},
    },
};

// =========================================================================
//  CARDS (receita, despesa, saldo)
// =========================================================================

/// Soma por tipo de lançamento. Tipo ausente conta como zero.
pub fn summarize_totals(time: String, rows: &[TypeSum]) -> SummaryInfo {
    let (income_amount, outgo_amount) =
        rows.iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(income, outgo), row| match row.bill_type {
                BillType::Income => (income + row.amount_sum, outgo),
                BillType::Outgo => (income, outgo + row.amount_sum),
            });

    SummaryInfo {
        time,
        income_amount,
        outgo_amount,
        balance_amount: income_amount - outgo_amount,
    }
}

// =========================================================================
//  GRÁFICO DE LINHA
// =========================================================================

/// Preenche os baldes vazios da série com zero, do balde 1 até o maior balde observado.
///
/// O limite superior vem do último balde presente nos dados, não do calendário:
/// no modo MONTH, se o último lançamento foi no dia 12, a série vai só até o dia 12,
/// mesmo que o mês tenha 31 dias. Série vazia continua vazia.
pub fn fill_time_series(
    time_type: TimeType,
    rows: &[LineChartEntry],
) -> Result<Vec<LineChartEntry>, AppError> {
    // Os rótulos têm largura fixa, então a ordem de string é a ordem cronológica
    let Some(max_time) = rows.iter().map(|row| row.time.as_str()).max() else {
        return Ok(Vec::new());
    };

    let reference = parse_bucket(time_type, max_time)?;
    let upper_limit = match time_type {
        TimeType::Year => reference.month(),
        TimeType::Month => reference.day(),
    };

    // Rótulo repetido: vale o último
    let amounts: HashMap<&str, Decimal> = rows
        .iter()
        .map(|row| (row.time.as_str(), row.total_amount))
        .collect();

    (1..=upper_limit)
        .map(|index| -> Result<LineChartEntry, AppError> {
            let date = match time_type {
                TimeType::Year => NaiveDate::from_ymd_opt(reference.year(), index, 1),
                TimeType::Month => {
                    NaiveDate::from_ymd_opt(reference.year(), reference.month(), index)
                }
            }
            .ok_or_else(|| anyhow!("balde {} fora do calendário para {}", index, max_time))?;

            let time = date.format(time_type.bucket_format()).to_string();
            let total_amount = amounts.get(time.as_str()).copied().unwrap_or(Decimal::ZERO);

            Ok(LineChartEntry { time, total_amount })
        })
        .collect()
}

fn parse_bucket(time_type: TimeType, value: &str) -> Result<NaiveDate, AppError> {
    let parsed = match time_type {
        // "YYYY-MM" não tem dia; fixamos o dia 1 só para o parse
        TimeType::Year => NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d"),
        TimeType::Month => NaiveDate::parse_from_str(value, "%Y-%m-%d"),
    };

    parsed.map_err(|e| {
        AppError::InternalServerError(anyhow!(
            "rótulo de balde inválido '{}' para {}: {}",
            value,
            time_type,
            e
        ))
    })
}

// =========================================================================
//  GRÁFICO DE ROSCA
// =========================================================================

/// Troca o ID da categoria pelo nome e calcula a fatia de cada linha.
///
/// ID sem nome correspondente mantém o próprio ID como rótulo.
/// Linhas cuja soma total é zero falham com `DivisionByZero`; entrada vazia devolve vazio.
pub fn shape_distribution(
    rows: &[CategorySum],
    names: &HashMap<Uuid, String>,
) -> Result<Vec<RingChartEntry>, AppError> {
    let total: Decimal = rows.iter().map(|row| row.amount_sum).sum();

    rows.iter()
        .map(|row| -> Result<RingChartEntry, AppError> {
            let category = names
                .get(&row.category_id)
                .cloned()
                .unwrap_or_else(|| row.category_id.to_string());

            Ok(RingChartEntry {
                category,
                amount: row.amount_sum,
                rate: share(row.amount_sum, total)?,
            })
        })
        .collect()
}

// round(amount / total, 2), meio-a-par
fn share(amount: Decimal, total: Decimal) -> Result<f64, AppError> {
    let rate = amount
        .checked_div(total)
        .ok_or(AppError::DivisionByZero)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

    rate.to_f64()
        .ok_or_else(|| AppError::InternalServerError(anyhow!("percentual fora do alcance de f64: {}", rate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn entry(time: &str, amount: i64) -> LineChartEntry {
        LineChartEntry {
            time: time.to_string(),
            total_amount: dec(amount),
        }
    }

    fn amounts(series: &[LineChartEntry]) -> Vec<Decimal> {
        series.iter().map(|e| e.total_amount).collect()
    }

    // --- Cards ---

    #[test]
    fn totals_compute_balance() {
        let rows = vec![
            TypeSum { bill_type: BillType::Income, amount_sum: dec(300) },
            TypeSum { bill_type: BillType::Outgo, amount_sum: dec(120) },
        ];
        let info = summarize_totals("2023".into(), &rows);
        assert_eq!(info.time, "2023");
        assert_eq!(info.income_amount, dec(300));
        assert_eq!(info.outgo_amount, dec(120));
        assert_eq!(info.balance_amount, dec(180));
    }

    #[test]
    fn missing_groups_default_to_zero() {
        let info = summarize_totals("2023-01".into(), &[]);
        assert_eq!(info.income_amount, Decimal::ZERO);
        assert_eq!(info.outgo_amount, Decimal::ZERO);
        assert_eq!(info.balance_amount, Decimal::ZERO);

        let only_outgo = [TypeSum { bill_type: BillType::Outgo, amount_sum: dec(50) }];
        let info = summarize_totals("2023-01".into(), &only_outgo);
        assert_eq!(info.income_amount, Decimal::ZERO);
        assert_eq!(info.balance_amount, dec(-50));
        assert_eq!(info.income_amount - info.outgo_amount, info.balance_amount);
    }

    // --- Linha ---

    #[test]
    fn empty_series_stays_empty() {
        assert!(fill_time_series(TimeType::Year, &[]).unwrap().is_empty());
        assert!(fill_time_series(TimeType::Month, &[]).unwrap().is_empty());
    }

    #[test]
    fn single_january_bucket_is_returned_as_is() {
        let series = fill_time_series(TimeType::Year, &[entry("2023-01", 100)]).unwrap();
        assert_eq!(series, vec![entry("2023-01", 100)]);
    }

    #[test]
    fn year_mode_fills_months_before_the_last_one() {
        let series = fill_time_series(TimeType::Year, &[entry("2023-03", 50)]).unwrap();
        let times: Vec<&str> = series.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, vec!["2023-01", "2023-02", "2023-03"]);
        assert_eq!(amounts(&series), vec![dec(0), dec(0), dec(50)]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let rows = vec![entry("2023-05", 7), entry("2023-02", 3)];
        let series = fill_time_series(TimeType::Year, &rows).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(amounts(&series), vec![dec(0), dec(3), dec(0), dec(0), dec(7)]);
    }

    #[test]
    fn month_mode_stops_at_last_observed_day() {
        // Fevereiro tem 28 dias, mas a série para no dia 12
        let rows = vec![entry("2023-02-03", 10), entry("2023-02-12", 5)];
        let series = fill_time_series(TimeType::Month, &rows).unwrap();
        assert_eq!(series.len(), 12);
        assert_eq!(series.first().unwrap().time, "2023-02-01");
        assert_eq!(series.last().unwrap().time, "2023-02-12");
        assert_eq!(series[2].total_amount, dec(10));
        assert_eq!(series[11].total_amount, dec(5));
    }

    #[test]
    fn every_input_amount_lands_on_its_bucket() {
        let rows = vec![entry("2024-01-01", 1), entry("2024-01-15", 15), entry("2024-01-31", 31)];
        let series = fill_time_series(TimeType::Month, &rows).unwrap();
        assert_eq!(series.len(), 31);

        for (index, bucket) in series.iter().enumerate() {
            let day = index as i64 + 1;
            assert_eq!(bucket.time, format!("2024-01-{:02}", day));
            assert!(NaiveDate::parse_from_str(&bucket.time, "%Y-%m-%d").is_ok());
            let expected = if [1, 15, 31].contains(&day) { dec(day) } else { Decimal::ZERO };
            assert_eq!(bucket.total_amount, expected);
        }
    }

    #[test]
    fn malformed_bucket_label_is_an_internal_error() {
        let result = fill_time_series(TimeType::Year, &[entry("2023/03", 1)]);
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    // --- Rosca ---

    fn category_sum(id: Uuid, amount: i64) -> CategorySum {
        CategorySum { category_id: id, amount_sum: dec(amount) }
    }

    #[test]
    fn distribution_resolves_names_and_rates() {
        let food = Uuid::new_v4();
        let rent = Uuid::new_v4();
        let names = HashMap::from([(food, "Mercado".to_string()), (rent, "Aluguel".to_string())]);

        let shaped =
            shape_distribution(&[category_sum(food, 25), category_sum(rent, 75)], &names).unwrap();

        assert_eq!(shaped[0].category, "Mercado");
        assert_eq!(shaped[0].amount, dec(25));
        assert_eq!(shaped[0].rate, 0.25);
        assert_eq!(shaped[1].category, "Aluguel");
        assert_eq!(shaped[1].rate, 0.75);
    }

    #[test]
    fn unresolved_category_keeps_raw_id() {
        let orphan = Uuid::new_v4();
        let shaped = shape_distribution(&[category_sum(orphan, 10)], &HashMap::new()).unwrap();
        assert_eq!(shaped[0].category, orphan.to_string());
        assert_eq!(shaped[0].rate, 1.0);
    }

    #[test]
    fn rates_round_half_to_even_and_sum_close_to_one() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        // 1/8 = 0.125 -> 0.12 ; 7/8 = 0.875 -> 0.88
        let shaped = shape_distribution(
            &[category_sum(ids[0], 1), category_sum(ids[1], 7)],
            &HashMap::new(),
        )
        .unwrap();
        assert_eq!(shaped[0].rate, 0.12);
        assert_eq!(shaped[1].rate, 0.88);

        let thirds = shape_distribution(
            &[category_sum(ids[0], 1), category_sum(ids[1], 1), category_sum(ids[2], 1)],
            &HashMap::new(),
        )
        .unwrap();
        let sum: f64 = thirds.iter().map(|e| e.rate).sum();
        assert!((sum - 1.0).abs() <= 0.01 * thirds.len() as f64);
        let amount_sum: Decimal = thirds.iter().map(|e| e.amount).sum();
        assert_eq!(amount_sum, dec(3));
    }

    #[test]
    fn zero_total_is_division_by_zero() {
        let result = shape_distribution(&[category_sum(Uuid::new_v4(), 0)], &HashMap::new());
        assert!(matches!(result, Err(AppError::DivisionByZero)));
    }

    #[test]
    fn empty_distribution_is_empty() {
        assert!(shape_distribution(&[], &HashMap::new()).unwrap().is_empty());
    }
}
