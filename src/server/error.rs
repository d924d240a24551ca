use crate::core::ForecastError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const NO_DATA_MESSAGE: &str = "Sem dados suficientes";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Converts `AppError` into an HTTP response. An empty ledger is not a
/// failure: it answers 200 with the no-data message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Forecast(err) = self;
        match err {
            ForecastError::EmptyDataset => {
                (StatusCode::OK, Json(json!({ "mensagem": NO_DATA_MESSAGE }))).into_response()
            }
            ForecastError::MalformedValue { .. } => {
                tracing::warn!(error = %err, "Malformed ledger row.");
                json_error(StatusCode::UNPROCESSABLE_ENTITY, "malformed_value", err.to_string())
            }
            ForecastError::Overflow { .. } => {
                tracing::warn!(error = %err, "Ledger totals out of range.");
                json_error(StatusCode::UNPROCESSABLE_ENTITY, "overflow", err.to_string())
            }
            ForecastError::StoreUnavailable(store_err) => {
                tracing::error!(error = ?store_err, "Record store error.");
                json_error(
                    StatusCode::BAD_GATEWAY,
                    "store_unavailable",
                    "The record store could not be reached",
                )
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
