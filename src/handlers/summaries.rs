// src/handlers/summaries.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::{error::AppError, query::ValidatedQuery},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::summary::{LineChart, RingChart, SummaryInfo, SummaryQuery},
    services::summary_service::SummaryService,
};

// GET /api/summaries/info
#[utoipa::path(
    get,
    path = "/api/summaries/info",
    tag = "Summaries",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Receita, despesa e saldo do período", body = SummaryInfo),
        (status = 400, description = "time_type / time_value ausente ou inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_info(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<SummaryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (_, scope) = SummaryService::resolve_scope(user.0, &query)?;

    let info = app_state.summary_service
        .get_info(&scope, &query.time_value)
        .await?;

    Ok((StatusCode::OK, Json(info)))
}

// GET /api/summaries/linechart
#[utoipa::path(
    get,
    path = "/api/summaries/linechart",
    tag = "Summaries",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Séries de receita e despesa por mês (YEAR) ou dia (MONTH)", body = LineChart),
        (status = 400, description = "time_type / time_value ausente ou inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_linechart(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<SummaryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (time_type, scope) = SummaryService::resolve_scope(user.0, &query)?;

    let chart = app_state.summary_service
        .get_linechart(&scope, time_type)
        .await?;

    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/summaries/ringchart
#[utoipa::path(
    get,
    path = "/api/summaries/ringchart",
    tag = "Summaries",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Distribuição por categoria", body = RingChart),
        (status = 400, description = "time_type / time_value ausente ou inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ringchart(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedQuery(query): ValidatedQuery<SummaryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (_, scope) = SummaryService::resolve_scope(user.0, &query)?;

    let chart = app_state.summary_service.get_ringchart(&scope).await?;

    Ok((StatusCode::OK, Json(chart)))
}
