//! Typed view over raw ledger rows.

use crate::core::error::ForecastError;
use crate::core::store::RawRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

const AMOUNT: &str = "amount";
const DUE_DATE: &str = "due_date";
const PAID: &str = "paid";
const DESCRIPTION: &str = "description";

/// A ledger entry. Positive amounts are inflows, negative amounts outflows.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRecord {
    /// `None` when the row carries no amount; such rows are neither inflow
    /// nor outflow.
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub paid: bool,
    pub description: Option<String>,
    /// Every other column, untouched.
    pub extra: Map<String, Value>,
}

impl FinancialRecord {
    /// Coerces a raw row.
    ///
    /// A present `amount` must be numeric (a JSON number or a numeric
    /// string); a null or missing one is read as no amount.
    /// With `strict_dates`, a `due_date` that is present but unparseable fails
    /// the row; otherwise it is read as absent. A null or missing `due_date`
    /// is never an error.
    pub fn from_raw(row: usize, raw: &RawRecord, strict_dates: bool) -> Result<Self, ForecastError> {
        let amount = match raw.get(AMOUNT) {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_amount(value).ok_or_else(|| malformed(row, AMOUNT, value))?),
        };

        let due_date = match raw.get(DUE_DATE) {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_str().and_then(parse_date) {
                Some(date) => Some(date),
                None if strict_dates => return Err(malformed(row, DUE_DATE, value)),
                None => None,
            },
        };

        let paid = match raw.get(PAID) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => return Err(malformed(row, PAID, other)),
        };

        let description = raw
            .get(DESCRIPTION)
            .and_then(Value::as_str)
            .map(str::to_string);

        let extra = raw
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), AMOUNT | DUE_DATE | PAID | DESCRIPTION))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(FinancialRecord {
            amount,
            due_date,
            paid,
            description,
            extra,
        })
    }

    /// The amount when it is strictly positive.
    pub fn inflow(&self) -> Option<Decimal> {
        self.amount.filter(|a| *a > Decimal::ZERO)
    }

    /// The absolute amount when it is strictly negative.
    pub fn outflow(&self) -> Option<Decimal> {
        self.amount.filter(|a| *a < Decimal::ZERO).map(|a| a.abs())
    }

    pub fn is_inflow(&self) -> bool {
        self.inflow().is_some()
    }

    pub fn is_outflow(&self) -> bool {
        self.outflow().is_some()
    }
}

/// Coerces every row, stopping at the first malformed one.
pub fn coerce_all(
    raws: &[RawRecord],
    strict_dates: bool,
) -> Result<Vec<FinancialRecord>, ForecastError> {
    raws.iter()
        .enumerate()
        .map(|(row, raw)| FinancialRecord::from_raw(row, raw, strict_dates))
        .collect()
}

fn malformed(row: usize, field: &'static str, value: &Value) -> ForecastError {
    ForecastError::MalformedValue {
        row,
        field,
        value: value.to_string(),
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Accepts plain dates, RFC 3339 timestamps, naive timestamps and the
/// day-first `dd/mm/yyyy` form used by the dashboard.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(s, "%d/%m/%Y").ok())
}
