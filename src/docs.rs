// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Categories ---
        handlers::bills::create_category,
        handlers::bills::list_categories,

        // --- Bills ---
        handlers::bills::create_bill,
        handlers::bills::list_bills,
        handlers::bills::get_bill,
        handlers::bills::update_bill,
        handlers::bills::delete_bill,

        // --- Summaries ---
        handlers::summaries::get_info,
        handlers::summaries::get_linechart,
        handlers::summaries::get_ringchart,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Bills ---
            models::bills::BillType,
            models::bills::Bill,
            models::bills::Category,
            models::bills::BillPayload,
            models::bills::CreateCategoryPayload,

            // --- Summaries ---
            models::summary::SummaryInfo,
            models::summary::LineChartEntry,
            models::summary::LineChart,
            models::summary::RingChartEntry,
            models::summary::RingChart,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Categories", description = "Categorias de lançamentos"),
        (name = "Bills", description = "Receitas e despesas"),
        (name = "Summaries", description = "Resumo do período e gráficos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
