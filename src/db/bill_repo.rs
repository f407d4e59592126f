// src/db/bill_repo.rs

use sqlx::{postgres::PgArguments, query::QueryAs, PgPool, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::{
        bills::{Bill, BillPayload},
        summary::{BillScope, CategorySum, LineChartEntry, TypeSum},
    },
};

const BILL_COLUMNS: &str =
    "id, category_id, bill_type, amount, record_date, remarks, create_time, modify_time";

// Filtro comum: $1 dono, $2 ano, $3 mês, $4 tipo. Filtro nulo = sem restrição.
const SCOPE_FILTER: &str = r#"
    user_id = $1
    AND ($2::int IS NULL OR EXTRACT(YEAR FROM record_date)::int = $2)
    AND ($3::int IS NULL OR EXTRACT(MONTH FROM record_date)::int = $3)
    AND ($4::bill_type IS NULL OR bill_type = $4)
"#;

fn bind_scope<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    scope: &BillScope,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(scope.owner_id)
        .bind(scope.year)
        .bind(scope.month)
        .bind(scope.bill_type)
}

#[derive(Clone)]
pub struct BillRepository {
    pool: PgPool,
}

impl BillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CRUD
    // =========================================================================

    pub async fn create(&self, user_id: Uuid, payload: &BillPayload) -> Result<Bill, AppError> {
        let sql = format!(
            r#"
            INSERT INTO bills (user_id, bill_type, amount, category_id, record_date, remarks)
            VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE), COALESCE($6, ''))
            RETURNING {}
            "#,
            BILL_COLUMNS
        );

        let bill = sqlx::query_as::<_, Bill>(&sql)
            .bind(user_id)
            .bind(payload.bill_type)
            .bind(payload.amount)
            .bind(payload.category_id)
            .bind(payload.record_date)
            .bind(payload.remarks.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(bill)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: &BillPayload,
    ) -> Result<Option<Bill>, AppError> {
        let sql = format!(
            r#"
            UPDATE bills
            SET bill_type = $3,
                amount = $4,
                category_id = $5,
                record_date = COALESCE($6, record_date),
                remarks = COALESCE($7, remarks),
                modify_time = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            BILL_COLUMNS
        );

        let bill = sqlx::query_as::<_, Bill>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(payload.bill_type)
            .bind(payload.amount)
            .bind(payload.category_id)
            .bind(payload.record_date)
            .bind(payload.remarks.as_deref())
            .fetch_optional(&self.pool)
            .await?;

        Ok(bill)
    }

    pub async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Bill>, AppError> {
        let sql = format!("SELECT {} FROM bills WHERE id = $1 AND user_id = $2", BILL_COLUMNS);

        let bill = sqlx::query_as::<_, Bill>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bill)
    }

    // Retorna true se algo foi apagado
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bills WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list(&self, scope: &BillScope) -> Result<Vec<Bill>, AppError> {
        let sql = format!(
            "SELECT {} FROM bills WHERE {} ORDER BY record_date DESC, create_time DESC",
            BILL_COLUMNS, SCOPE_FILTER
        );

        let bills = bind_scope(sqlx::query_as::<_, Bill>(&sql), scope)
            .fetch_all(&self.pool)
            .await?;

        Ok(bills)
    }

    // =========================================================================
    //  AGREGAÇÕES (resumos e gráficos)
    // =========================================================================

    /// Soma por tipo (receita / despesa).
    pub async fn sum_by_type(&self, scope: &BillScope) -> Result<Vec<TypeSum>, AppError> {
        let sql = format!(
            r#"
            SELECT bill_type, SUM(amount) AS amount_sum
            FROM bills
            WHERE {}
            GROUP BY bill_type
            "#,
            SCOPE_FILTER
        );

        let rows = bind_scope(sqlx::query_as::<_, TypeSum>(&sql), scope)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Soma por balde de tempo. `pattern` é um formato do `to_char` ("YYYY-MM", "YYYY-MM-DD").
    pub async fn sum_by_time_bucket(
        &self,
        scope: &BillScope,
        pattern: &str,
    ) -> Result<Vec<LineChartEntry>, AppError> {
        let sql = format!(
            r#"
            SELECT to_char(record_date, $5) AS time, SUM(amount) AS total_amount
            FROM bills
            WHERE {}
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
            SCOPE_FILTER
        );

        let rows = bind_scope(sqlx::query_as::<_, LineChartEntry>(&sql), scope)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Soma por categoria.
    pub async fn sum_by_category(&self, scope: &BillScope) -> Result<Vec<CategorySum>, AppError> {
        let sql = format!(
            r#"
            SELECT category_id, SUM(amount) AS amount_sum
            FROM bills
            WHERE {}
            GROUP BY category_id
            ORDER BY amount_sum DESC
            "#,
            SCOPE_FILTER
        );

        let rows = bind_scope(sqlx::query_as::<_, CategorySum>(&sql), scope)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A ordem dos placeholders precisa casar com `bind_scope`
    #[test]
    fn scope_filter_placeholders_follow_bind_order() {
        let owner = SCOPE_FILTER.find("user_id = $1").unwrap();
        let year = SCOPE_FILTER.find("EXTRACT(YEAR FROM record_date)::int = $2").unwrap();
        let month = SCOPE_FILTER.find("EXTRACT(MONTH FROM record_date)::int = $3").unwrap();
        let bill_type = SCOPE_FILTER.find("bill_type = $4").unwrap();
        assert!(owner < year && year < month && month < bill_type);
        assert!(!SCOPE_FILTER.contains("$5"));
    }

    #[test]
    fn bill_columns_match_bill_struct() {
        let columns: Vec<&str> = BILL_COLUMNS.split(',').map(str::trim).collect();
        assert_eq!(
            columns,
            vec!["id", "category_id", "bill_type", "amount", "record_date", "remarks", "create_time", "modify_time"]
        );
    }
}
