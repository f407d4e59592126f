// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Tudo abaixo exige Bearer token; cada usuário só enxerga os próprios lançamentos
    let protected_routes = Router::new()
        .route("/api/users/me", get(handlers::auth::get_me))
        .route("/api/categories"
               ,post(handlers::bills::create_category)
               .get(handlers::bills::list_categories)
        )
        .route("/api/bills"
               ,post(handlers::bills::create_bill)
               .get(handlers::bills::list_bills)
        )
        .route("/api/bills/{id}"
               ,get(handlers::bills::get_bill)
               .put(handlers::bills::update_bill)
               .delete(handlers::bills::delete_bill)
        )
        .route("/api/summaries/info", get(handlers::summaries::get_info))
        .route("/api/summaries/linechart", get(handlers::summaries::get_linechart))
        .route("/api/summaries/ringchart", get(handlers::summaries::get_ringchart))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
