//! Fetch-then-compute operations shared by the console and HTTP surfaces.
use crate::core::analytics::{Forecast, ForecastParams, calculate_forecast, forecast_from_raw};
use crate::core::error::ForecastError;
use crate::core::payables::{Payable, list_payables};
use crate::core::record::coerce_all;
use crate::core::store::RecordStore;
use crate::core::summary::{LedgerSummary, summarize};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn RecordStore>,
    collection: String,
}

impl Ledger {
    pub fn new(store: Arc<dyn RecordStore>, collection: &str) -> Self {
        Ledger {
            store,
            collection: collection.to_string(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn forecast(&self, params: &ForecastParams) -> Result<Forecast, ForecastError> {
        let rows = self.store.fetch_all(&self.collection).await?;
        debug!("Forecasting over {} rows", rows.len());
        forecast_from_raw(&rows, params)
    }

    /// Forecast and summary over a single fetch and a single coercion pass,
    /// for the console report. Both share the profile's date strictness.
    pub async fn report(
        &self,
        params: &ForecastParams,
    ) -> Result<(Forecast, LedgerSummary), ForecastError> {
        let rows = self.store.fetch_all(&self.collection).await?;
        if rows.is_empty() {
            return Err(ForecastError::EmptyDataset);
        }
        let records = coerce_all(&rows, params.require_due_date)?;
        let forecast = calculate_forecast(&records, params)?;
        let summary = summarize(&records)?;
        Ok((forecast, summary))
    }

    pub async fn summary(&self) -> Result<LedgerSummary, ForecastError> {
        let rows = self.store.fetch_all(&self.collection).await?;
        let records = coerce_all(&rows, false)?;
        summarize(&records)
    }

    pub async fn payables(&self, today: NaiveDate) -> Result<Vec<Payable>, ForecastError> {
        let rows = self.store.fetch_all(&self.collection).await?;
        let records = coerce_all(&rows, true)?;
        Ok(list_payables(&records, today))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedStore;
    use super::*;
    use crate::core::analytics::HealthStatus;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_forecast_fetches_once() {
        let store = Arc::new(FixedStore::new(json!([
            {"amount": 500, "due_date": "2025-01-10"},
            {"amount": -200, "due_date": "2025-01-12"}
        ])));
        let ledger = Ledger::new(store.clone(), "financial_records");

        let forecast = ledger.forecast(&ForecastParams::report()).await.unwrap();
        assert_eq!(forecast.predicted_revenue, dec!(500));
        assert_eq!(forecast.health_status, HealthStatus::Stable);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let ledger = Ledger::new(Arc::new(FixedStore::failing()), "financial_records");

        let err = ledger.forecast(&ForecastParams::endpoint()).await.unwrap_err();
        assert!(matches!(err, ForecastError::StoreUnavailable(_)));
        assert!(matches!(
            ledger.summary().await.unwrap_err(),
            ForecastError::StoreUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_report_uses_one_fetch() {
        let store = Arc::new(FixedStore::new(json!([
            {"amount": 250.75, "due_date": "2025-03-01"},
            {"amount": -50, "due_date": "2025-03-02", "paid": false}
        ])));
        let ledger = Ledger::new(store.clone(), "financial_records");

        let (forecast, summary) = ledger.report(&ForecastParams::report()).await.unwrap();
        assert_eq!(forecast.predicted_revenue, dec!(250.75));
        assert_eq!(summary.payable_total, dec!(50));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);

        let empty = Ledger::new(Arc::new(FixedStore::new(json!([]))), "financial_records");
        assert!(empty.report(&ForecastParams::report()).await.unwrap_err().is_empty_dataset());
    }

    #[tokio::test]
    async fn test_report_follows_profile_date_strictness() {
        let rows = json!([
            {"amount": 400, "due_date": "depois"},
            {"amount": -150, "due_date": "2025-03-02", "paid": false},
            {"amount": null}
        ]);

        let strict = Ledger::new(Arc::new(FixedStore::new(rows.clone())), "financial_records");
        let err = strict.report(&ForecastParams::report()).await.unwrap_err();
        assert!(matches!(err, ForecastError::MalformedValue { row: 0, field: "due_date", .. }));

        let lenient = Ledger::new(Arc::new(FixedStore::new(rows)), "financial_records");
        let params = ForecastParams {
            require_due_date: false,
            ..ForecastParams::report()
        };
        let (forecast, summary) = lenient.report(&params).await.unwrap();
        assert_eq!(forecast.predicted_revenue, dec!(400));
        assert_eq!(forecast.record_count, 3);
        assert_eq!(summary.inflow_total, forecast.inflow_total);
        assert_eq!(summary.outflow_total, forecast.outflow_total);
        assert_eq!(summary.profit, dec!(250));
    }

    #[tokio::test]
    async fn test_report_overflow_is_an_error() {
        let ledger = Ledger::new(
            Arc::new(FixedStore::new(json!([
                {"amount": "50000000000000000000000000000"},
                {"amount": "50000000000000000000000000000"}
            ]))),
            "financial_records",
        );
        let err = ledger.report(&ForecastParams::report()).await.unwrap_err();
        assert!(matches!(err, ForecastError::Overflow { .. }));
        assert!(matches!(ledger.summary().await.unwrap_err(), ForecastError::Overflow { .. }));
    }

    #[tokio::test]
    async fn test_summary_and_payables() {
        let ledger = Ledger::new(
            Arc::new(FixedStore::new(json!([
                {"amount": 1000, "paid": true},
                {"amount": -300, "paid": false, "due_date": "2026-03-01", "description": "Aluguel"},
                {"amount": -100, "paid": true, "due_date": "2026-02-01"}
            ]))),
            "financial_records",
        );

        let summary = ledger.summary().await.unwrap();
        assert_eq!(summary.profit, dec!(600));
        assert_eq!(summary.payable_total, dec!(300));

        let today = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        let payables = ledger.payables(today).await.unwrap();
        assert_eq!(payables.len(), 1);
        assert_eq!(payables[0].description, "Aluguel");
    }
}
