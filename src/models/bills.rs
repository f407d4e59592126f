// src/models/bills.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bill_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillType {
    Outgo,  // Despesa
    Income, // Receita
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(example = "Mercado")]
    pub name: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bill {
    pub id: Uuid,

    pub category_id: Uuid,
    pub bill_type: BillType,

    #[schema(value_type = f64, example = 42.5)]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2023-03-15")]
    pub record_date: NaiveDate,

    #[schema(example = "Almoço")]
    pub remarks: String,

    pub create_time: DateTime<Utc>,
    pub modify_time: DateTime<Utc>,
}

// ---
// Validação Customizada
// ---

// Coluna NUMERIC(16, 2): até 14 dígitos inteiros e 2 casas decimais
const MAX_AMOUNT_EXCLUSIVE: i64 = 100_000_000_000_000;

fn validate_amount(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    if *val >= Decimal::from(MAX_AMOUNT_EXCLUSIVE) {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &"99999999999999.99");
        err.message = Some("O valor excede o máximo de 99999999999999.99.".into());
        return Err(err);
    }
    // "10.50" e "10.500" são o mesmo valor; só conta a escala significativa
    if val.normalize().scale() > 2 {
        let mut err = ValidationError::new("decimal_places");
        err.add_param("max".into(), &2);
        err.message = Some("O valor deve ter no máximo 2 casas decimais.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O nome não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryPayload {
    #[validate(
        length(min = 1, max = 50, message = "O nome deve ter entre 1 e 50 caracteres."),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "Salário")]
    pub name: String,
}

// Usado tanto na criação quanto na atualização de um lançamento
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BillPayload {
    pub bill_type: BillType,

    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = f64, example = 42.5)]
    pub amount: Decimal,

    pub category_id: Uuid,

    // Se ausente, o banco assume a data de hoje
    #[schema(value_type = Option<String>, format = Date, example = "2023-03-15")]
    pub record_date: Option<NaiveDate>,

    #[validate(length(max = 140, message = "As observações devem ter no máximo 140 caracteres."))]
    pub remarks: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BillListQuery {
    pub bill_type: Option<BillType>,

    #[validate(range(min = 1, max = 9999, message = "Ano inválido."))]
    pub year: Option<i32>,

    #[validate(range(min = 1, max = 12, message = "Mês inválido."))]
    pub month: Option<i32>,
}
