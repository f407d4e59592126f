// src/common/query.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::common::error::AppError;

// Extrator de query string já validada.
// Parâmetro ausente ou mal formado vira 400 antes de qualquer consulta ao banco.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedQuery(value))
    }
}
