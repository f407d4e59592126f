// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, net::SocketAddr, time::Duration};

use crate::{
    db::{BillRepository, CategoryRepository, UserRepository},
    services::{auth::AuthService, bill_service::BillService, summary_service::SummaryService},
};

// Configuração lida do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR inválido")?;

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(value) => value.parse().context("DB_MAX_CONNECTIONS inválido")?,
            Err(_) => 5,
        };

        let db_acquire_timeout = match env::var("DB_ACQUIRE_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(value.parse().context("DB_ACQUIRE_TIMEOUT_SECS inválido")?),
            Err(_) => Duration::from_secs(3),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
            db_acquire_timeout,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub bill_service: BillService,
    pub summary_service: SummaryService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config.jwt_secret.clone()))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let bill_repo = BillRepository::new(db_pool.clone());
        let category_repo = CategoryRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(user_repo, jwt_secret),
            bill_service: BillService::new(bill_repo.clone(), category_repo.clone()),
            summary_service: SummaryService::new(bill_repo, category_repo),
            db_pool,
        }
    }
}
