// src/services/summary_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BillRepository, CategoryRepository},
    models::{
        bills::BillType,
        summary::{BillScope, LineChart, RingChart, RingChartEntry, SummaryInfo, SummaryQuery, TimeType},
    },
    services::charts::{fill_time_series, shape_distribution, summarize_totals},
};

#[derive(Clone)]
pub struct SummaryService {
    bill_repo: BillRepository,
    category_repo: CategoryRepository,
}

impl SummaryService {
    pub fn new(bill_repo: BillRepository, category_repo: CategoryRepository) -> Self {
        Self { bill_repo, category_repo }
    }

    /// Traduz a query string no filtro de lançamentos do usuário.
    pub fn resolve_scope(user_id: Uuid, query: &SummaryQuery) -> Result<(TimeType, BillScope), AppError> {
        let time_type: TimeType = query.time_type.parse()?;
        let scope = BillScope::resolve(user_id, time_type, &query.time_value)?;
        tracing::debug!(?scope, %time_type, "escopo do resumo resolvido");
        Ok((time_type, scope))
    }

    // 1. Cards
    pub async fn get_info(&self, scope: &BillScope, time_value: &str) -> Result<SummaryInfo, AppError> {
        let rows = self.bill_repo.sum_by_type(scope).await?;
        Ok(summarize_totals(time_value.to_string(), &rows))
    }

    // 2. Gráfico de linha
    pub async fn get_linechart(&self, scope: &BillScope, time_type: TimeType) -> Result<LineChart, AppError> {
        let pattern = time_type.sql_bucket_pattern();

        let income_rows = self.bill_repo
            .sum_by_time_bucket(&scope.with_bill_type(BillType::Income), pattern)
            .await?;
        let outgo_rows = self.bill_repo
            .sum_by_time_bucket(&scope.with_bill_type(BillType::Outgo), pattern)
            .await?;

        Ok(LineChart {
            income: fill_time_series(time_type, &income_rows)?,
            outgo: fill_time_series(time_type, &outgo_rows)?,
        })
    }

    // 3. Gráfico de rosca
    pub async fn get_ringchart(&self, scope: &BillScope) -> Result<RingChart, AppError> {
        Ok(RingChart {
            income: self.distribution(&scope.with_bill_type(BillType::Income)).await?,
            outgo: self.distribution(&scope.with_bill_type(BillType::Outgo)).await?,
        })
    }

    async fn distribution(&self, scope: &BillScope) -> Result<Vec<RingChartEntry>, AppError> {
        let rows = self.bill_repo.sum_by_category(scope).await?;

        // Só calcula percentuais quando há o que dividir
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.category_id).collect();
        let names = self.category_repo.find_names_by_ids(&ids).await?;

        shape_distribution(&rows, &names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(time_type: &str, time_value: &str) -> SummaryQuery {
        SummaryQuery {
            time_type: time_type.to_string(),
            time_value: time_value.to_string(),
        }
    }

    #[test]
    fn resolves_month_scope_for_the_caller() {
        let user = Uuid::new_v4();
        let (time_type, scope) = SummaryService::resolve_scope(user, &query("MONTH", "2023-07")).unwrap();
        assert_eq!(time_type, TimeType::Month);
        assert_eq!(scope.owner_id, user);
        assert_eq!((scope.year, scope.month), (Some(2023), Some(7)));
        assert_eq!(scope.bill_type, None);
    }

    #[test]
    fn unknown_time_type_never_yields_an_unscoped_filter() {
        let result = SummaryService::resolve_scope(Uuid::new_v4(), &query("DAY", "2023"));
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }
}
