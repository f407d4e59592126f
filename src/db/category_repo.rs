// src/db/category_repo.rs

use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use crate::{common::error::AppError, models::bills::Category};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, name: &str) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
            .bind(user_id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::InvalidArgument(format!(
                            "Já existe uma categoria chamada '{}'.",
                            name
                        ));
                    }
                }
                AppError::DatabaseError(e)
            })
    }

    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE user_id = $1
            ORDER BY name ASC
            "#,
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }

    pub async fn exists_for_user(&self, user_id: Uuid, category_id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1 AND user_id = $2)",
        )
            .bind(category_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    // Uma única consulta para todos os IDs do gráfico
    pub async fn find_names_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            "SELECT id, name FROM categories WHERE id = ANY($1)",
        )
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().collect())
    }
}
