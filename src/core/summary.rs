//! Ledger totals shown on the dashboard cards.
use crate::core::analytics::checked_total;
use crate::core::error::ForecastError;
use crate::core::record::FinancialRecord;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    #[serde(rename = "entradas", with = "rust_decimal::serde::float")]
    pub inflow_total: Decimal,
    #[serde(rename = "saidas", with = "rust_decimal::serde::float")]
    pub outflow_total: Decimal,
    #[serde(rename = "lucro", with = "rust_decimal::serde::float")]
    pub profit: Decimal,
    /// Outflows not yet marked as paid.
    #[serde(rename = "a_pagar", with = "rust_decimal::serde::float")]
    pub payable_total: Decimal,
}

pub fn summarize(records: &[FinancialRecord]) -> Result<LedgerSummary, ForecastError> {
    let inflow_total = checked_total(
        records.iter().filter_map(FinancialRecord::inflow),
        "entradas",
    )?;
    let outflow_total = checked_total(
        records.iter().filter_map(FinancialRecord::outflow),
        "saidas",
    )?;
    let payable_total = checked_total(
        records
            .iter()
            .filter(|r| !r.paid)
            .filter_map(FinancialRecord::outflow),
        "a_pagar",
    )?;
    let profit = inflow_total
        .checked_sub(outflow_total)
        .ok_or(ForecastError::Overflow { quantity: "lucro" })?;

    Ok(LedgerSummary {
        inflow_total,
        outflow_total,
        profit,
        payable_total,
    })
}
