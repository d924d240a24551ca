use crate::core::analytics::{Forecast, OperationalRisk};
use crate::core::payables::Payable;
use crate::core::summary::LedgerSummary;
use crate::server::{AppState, error::AppError};
use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// Body of a successful `GET /previsao`.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub faturamento_previsto: Decimal,
    pub risco_operacional: OperationalRisk,
    pub dica_anubis: &'static str,
}

impl From<&Forecast> for ForecastResponse {
    fn from(forecast: &Forecast) -> Self {
        ForecastResponse {
            faturamento_previsto: forecast.predicted_revenue,
            risco_operacional: forecast.operational_risk,
            dica_anubis: forecast.tip.as_str(),
        }
    }
}

/// # GET /previsao
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ForecastResponse>, AppError> {
    let forecast = state.ledger.forecast(&state.params).await?;
    Ok(Json(ForecastResponse::from(&forecast)))
}

/// # GET /resumo
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LedgerSummary>, AppError> {
    Ok(Json(state.ledger.summary().await?))
}

/// # GET /contas
/// Unpaid outflows, earliest due date first.
pub async fn get_payables(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Payable>>, AppError> {
    let today = chrono::Local::now().date_naive();
    Ok(Json(state.ledger.payables(today).await?))
}
