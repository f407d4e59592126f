// src/handlers/bills.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, query::ValidatedQuery},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::bills::{Bill, BillListQuery, BillPayload, Category, CreateCategoryPayload},
};

// =============================================================================
//  CATEGORIAS
// =============================================================================

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state.bill_service
        .create_category(user.0, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Categorias do usuário", body = Vec<Category>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.bill_service.list_categories(user.0).await?;
    Ok((StatusCode::OK, Json(categories)))
}

// =============================================================================
//  LANÇAMENTOS
// =============================================================================

// POST /api/bills
#[utoipa::path(
    post,
    path = "/api/bills",
    tag = "Bills",
    request_body = BillPayload,
    responses(
        (status = 201, description = "Lançamento criado", body = Bill),
        (status = 400, description = "Dados inválidos ou categoria inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_bill(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<BillPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let bill = app_state.bill_service.create_bill(user.0, &payload).await?;

    Ok((StatusCode::CREATED, Json(bill)))
}

// GET /api/bills
#[utoipa::path(
    get,
    path = "/api/bills",
    tag = "Bills",
    params(BillListQuery),
    responses(
        (status = 200, description = "Lançamentos do usuário, mais recentes primeiro", body = Vec<Bill>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_bills(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<BillListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bills = app_state.bill_service.list_bills(user.0, &query).await?;
    Ok((StatusCode::OK, Json(bills)))
}

// GET /api/bills/{id}
#[utoipa::path(
    get,
    path = "/api/bills/{id}",
    tag = "Bills",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento", body = Bill),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_bill(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bill = app_state.bill_service.get_bill(user.0, id).await?;
    Ok((StatusCode::OK, Json(bill)))
}

// PUT /api/bills/{id}
#[utoipa::path(
    put,
    path = "/api/bills/{id}",
    tag = "Bills",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    request_body = BillPayload,
    responses(
        (status = 200, description = "Lançamento atualizado", body = Bill),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_bill(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BillPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let bill = app_state.bill_service.update_bill(user.0, id, &payload).await?;
    Ok((StatusCode::OK, Json(bill)))
}

// DELETE /api/bills/{id}
#[utoipa::path(
    delete,
    path = "/api/bills/{id}",
    tag = "Bills",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_bill(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.bill_service.delete_bill(user.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
