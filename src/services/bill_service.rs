// src/services/bill_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BillRepository, CategoryRepository},
    models::{
        bills::{Bill, BillListQuery, BillPayload, Category},
        summary::BillScope,
    },
};

#[derive(Clone)]
pub struct BillService {
    bill_repo: BillRepository,
    category_repo: CategoryRepository,
}

impl BillService {
    pub fn new(bill_repo: BillRepository, category_repo: CategoryRepository) -> Self {
        Self { bill_repo, category_repo }
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn create_category(&self, user_id: Uuid, name: &str) -> Result<Category, AppError> {
        self.category_repo.create(user_id, name.trim()).await
    }

    pub async fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>, AppError> {
        self.category_repo.get_all(user_id).await
    }

    // =========================================================================
    //  LANÇAMENTOS
    // =========================================================================

    pub async fn create_bill(&self, user_id: Uuid, payload: &BillPayload) -> Result<Bill, AppError> {
        self.ensure_category_owned(user_id, payload.category_id).await?;
        self.bill_repo.create(user_id, payload).await
    }

    pub async fn update_bill(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: &BillPayload,
    ) -> Result<Bill, AppError> {
        self.ensure_category_owned(user_id, payload.category_id).await?;
        self.bill_repo
            .update(user_id, id, payload)
            .await?
            .ok_or(AppError::NotFound("Lançamento"))
    }

    // Lançamento de outro usuário aparece como inexistente
    pub async fn get_bill(&self, user_id: Uuid, id: Uuid) -> Result<Bill, AppError> {
        self.bill_repo
            .find_by_id(user_id, id)
            .await?
            .ok_or(AppError::NotFound("Lançamento"))
    }

    pub async fn delete_bill(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.bill_repo.delete(user_id, id).await? {
            return Err(AppError::NotFound("Lançamento"));
        }
        Ok(())
    }

    pub async fn list_bills(&self, user_id: Uuid, query: &BillListQuery) -> Result<Vec<Bill>, AppError> {
        let scope = BillScope {
            owner_id: user_id,
            year: query.year,
            month: query.month,
            bill_type: query.bill_type,
        };
        self.bill_repo.list(&scope).await
    }

    async fn ensure_category_owned(&self, user_id: Uuid, category_id: Uuid) -> Result<(), AppError> {
        if !self.category_repo.exists_for_user(user_id, category_id).await? {
            return Err(AppError::InvalidArgument(format!(
                "Categoria {} não existe.",
                category_id
            )));
        }
        Ok(())
    }
}
