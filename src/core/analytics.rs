//! Provides the revenue forecast calculation over ledger records.
use crate::core::error::ForecastError;
use crate::core::record::{FinancialRecord, coerce_all};
use crate::core::store::RawRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// Constants that distinguish one forecast surface from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    /// Length of the window the inflow total is normalised over.
    pub normalization_days: u32,
    pub growth_multiplier: Decimal,
    /// Predictions strictly above this are `Stable`.
    pub health_floor: Decimal,
    /// Risk is `Low` only when inflows exceed outflows times this ratio.
    pub risk_outflow_ratio: Decimal,
    /// Inflow totals strictly above this get the stock-up tip.
    pub tip_threshold: Decimal,
    /// Whether a malformed `due_date` aborts the calculation.
    pub require_due_date: bool,
}

impl ForecastParams {
    /// Profile used by the console report: plain 30 day projection.
    pub fn report() -> Self {
        ForecastParams {
            normalization_days: 30,
            growth_multiplier: Decimal::ONE,
            health_floor: Decimal::ZERO,
            risk_outflow_ratio: Decimal::ONE,
            tip_threshold: dec!(1000),
            require_due_date: true,
        }
    }

    /// Profile used by the HTTP endpoint: 10% growth on top of inflows.
    pub fn endpoint() -> Self {
        ForecastParams {
            growth_multiplier: dec!(1.1),
            require_due_date: false,
            ..Self::report()
        }
    }
}

/// Partial override of a [`ForecastParams`] profile, as read from config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastOverrides {
    pub normalization_days: Option<u32>,
    pub growth_multiplier: Option<Decimal>,
    pub health_floor: Option<Decimal>,
    pub risk_outflow_ratio: Option<Decimal>,
    pub tip_threshold: Option<Decimal>,
    pub require_due_date: Option<bool>,
}

impl ForecastOverrides {
    pub fn apply(&self, base: ForecastParams) -> ForecastParams {
        ForecastParams {
            normalization_days: self.normalization_days.unwrap_or(base.normalization_days),
            growth_multiplier: self.growth_multiplier.unwrap_or(base.growth_multiplier),
            health_floor: self.health_floor.unwrap_or(base.health_floor),
            risk_outflow_ratio: self.risk_outflow_ratio.unwrap_or(base.risk_outflow_ratio),
            tip_threshold: self.tip_threshold.unwrap_or(base.tip_threshold),
            require_due_date: self.require_due_date.unwrap_or(base.require_due_date),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    #[serde(rename = "Estável")]
    Stable,
    #[serde(rename = "Alerta")]
    Alert,
}

impl Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HealthStatus::Stable => "Estável",
                HealthStatus::Alert => "Alerta",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationalRisk {
    #[serde(rename = "Baixo")]
    Low,
    #[serde(rename = "Alto")]
    High,
}

impl Display for OperationalRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OperationalRisk::Low => "Baixo",
                OperationalRisk::High => "Alto",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tip {
    IncreaseSupplyStock,
    FocusOnSales,
}

impl Tip {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tip::IncreaseSupplyStock => "increase supply stock",
            Tip::FocusOnSales => "focus on sales",
        }
    }
}

impl Display for Tip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one forecast run derives. Each surface picks the fields it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub record_count: usize,
    pub inflow_total: Decimal,
    pub outflow_total: Decimal,
    pub daily_average: Decimal,
    pub predicted_revenue: Decimal,
    pub health_status: HealthStatus,
    pub operational_risk: OperationalRisk,
    pub tip: Tip,
}

/// The two-field summary printed by the console report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub predicted_revenue: Decimal,
    pub health_status: HealthStatus,
}

impl Forecast {
    pub fn health_report(&self) -> HealthReport {
        HealthReport {
            predicted_revenue: self.predicted_revenue.round_dp(2),
            health_status: self.health_status,
        }
    }
}

/// Calculates a forecast from already coerced records.
///
/// The inflow total is turned into a daily rate over `normalization_days` and
/// projected back over the same window before growth is applied. The product
/// is rescaled to the precision of the inputs, so without growth the
/// prediction equals the inflow total exactly. Any quantity leaving the
/// decimal range is reported as [`ForecastError::Overflow`].
pub fn calculate_forecast(
    records: &[FinancialRecord],
    params: &ForecastParams,
) -> Result<Forecast, ForecastError> {
    if records.is_empty() {
        return Err(ForecastError::EmptyDataset);
    }

    let inflow_total = checked_total(
        records.iter().filter_map(FinancialRecord::inflow),
        "inflow_total",
    )?;
    let outflow_total = checked_total(
        records.iter().filter_map(FinancialRecord::outflow),
        "outflow_total",
    )?;

    // A zero-day window would divide by zero; treat it as a single day.
    let days = Decimal::from(params.normalization_days.max(1));
    let daily_average = inflow_total
        .checked_div(days)
        .ok_or(ForecastError::Overflow { quantity: "daily_average" })?;
    // Rates below the smallest representable step do not survive the round
    // trip; the inflow total is the exact projection in that case.
    let projected = daily_average
        .checked_mul(days)
        .map(|p| p.round_dp(inflow_total.scale()))
        .filter(|p| *p == inflow_total)
        .unwrap_or(inflow_total);
    let predicted_revenue = projected
        .checked_mul(params.growth_multiplier)
        .ok_or(ForecastError::Overflow { quantity: "predicted_revenue" })?;
    let outflow_bound = outflow_total
        .checked_mul(params.risk_outflow_ratio)
        .ok_or(ForecastError::Overflow { quantity: "outflow_total" })?;

    let health_status = if predicted_revenue > params.health_floor {
        HealthStatus::Stable
    } else {
        HealthStatus::Alert
    };
    let operational_risk = if inflow_total > outflow_bound {
        OperationalRisk::Low
    } else {
        OperationalRisk::High
    };
    let tip = if inflow_total > params.tip_threshold {
        Tip::IncreaseSupplyStock
    } else {
        Tip::FocusOnSales
    };

    debug!(
        records = records.len(),
        %inflow_total,
        %outflow_total,
        %predicted_revenue,
        "Calculated forecast"
    );

    Ok(Forecast {
        record_count: records.len(),
        inflow_total,
        outflow_total,
        daily_average,
        predicted_revenue,
        health_status,
        operational_risk,
        tip,
    })
}

/// Sums amounts, failing instead of wrapping past the decimal range.
pub(crate) fn checked_total(
    amounts: impl IntoIterator<Item = Decimal>,
    quantity: &'static str,
) -> Result<Decimal, ForecastError> {
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, a| {
        acc.checked_add(a).ok_or(ForecastError::Overflow { quantity })
    })
}

/// Coerces raw rows and calculates a forecast. An empty row set is reported
/// before any coercion happens.
pub fn forecast_from_raw(
    rows: &[RawRecord],
    params: &ForecastParams,
) -> Result<Forecast, ForecastError> {
    if rows.is_empty() {
        return Err(ForecastError::EmptyDataset);
    }
    let records = coerce_all(rows, params.require_due_date)?;
    calculate_forecast(&records, params)
}
