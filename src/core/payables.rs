//! Unpaid outflows and how close they are to their due date.
use crate::core::record::FinancialRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "tipo", content = "dias")]
pub enum DueStatus {
    #[serde(rename = "vencida")]
    Overdue,
    #[serde(rename = "hoje")]
    DueToday,
    #[serde(rename = "em_dias")]
    DueIn(i64),
}

impl DueStatus {
    pub fn classify(due_date: NaiveDate, today: NaiveDate) -> Self {
        let days = (due_date - today).num_days();
        match days {
            d if d < 0 => DueStatus::Overdue,
            0 => DueStatus::DueToday,
            d => DueStatus::DueIn(d),
        }
    }
}

impl Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueStatus::Overdue => write!(f, "Vencida"),
            DueStatus::DueToday => write!(f, "Hoje"),
            DueStatus::DueIn(days) => write!(f, "Em {days} dias"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payable {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "vencimento")]
    pub due_date: NaiveDate,
    pub status: DueStatus,
}

/// Unpaid outflows that carry a due date, earliest first.
pub fn list_payables(records: &[FinancialRecord], today: NaiveDate) -> Vec<Payable> {
    let mut payables: Vec<Payable> = records
        .iter()
        .filter(|r| !r.paid)
        .filter_map(|r| {
            let amount = r.outflow()?;
            let due_date = r.due_date?;
            Some(Payable {
                description: r.description.clone().unwrap_or_default(),
                amount,
                due_date,
                status: DueStatus::classify(due_date, today),
            })
        })
        .collect();
    payables.sort_by_key(|p| p.due_date);
    payables
}
