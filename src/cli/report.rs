use super::ui;
use crate::core::analytics::{Forecast, ForecastParams, HealthStatus};
use crate::core::summary::LedgerSummary;
use crate::core::{ForecastError, Ledger};
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

pub const NO_DATA_MESSAGE: &str = "Sem dados para análise.";

pub fn render_forecast(forecast: &Forecast, currency: &str) -> String {
    let report = forecast.health_report();
    let status_style = match report.health_status {
        HealthStatus::Stable => ui::StyleType::TotalValue,
        HealthStatus::Alert => ui::StyleType::Error,
    };

    let mut output = format!(
        "{}\n",
        ui::style_text("--- RELATÓRIO ANUBIS INTELLIGENCE ---", ui::StyleType::Title)
    );
    output.push_str(&format!(
        "Previsão de Faturamento: {currency} {:.2}\n",
        report.predicted_revenue
    ));
    output.push_str(&format!(
        "Status de Saúde: {}",
        ui::style_text(&report.health_status.to_string(), status_style)
    ));
    output
}

pub fn render_summary(summary: &LedgerSummary, currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Entradas"),
        ui::header_cell("Saídas"),
        ui::header_cell("Lucro"),
        ui::header_cell("A Pagar"),
    ]);
    table.add_row(vec![
        ui::amount_cell(summary.inflow_total, currency),
        ui::expense_cell(summary.outflow_total, currency),
        ui::amount_cell(summary.profit, currency),
        Cell::new(format!("{currency} {:.2}", summary.payable_total)),
    ]);
    table.to_string()
}

pub async fn run(ledger: &Ledger, params: &ForecastParams, currency: &str) -> Result<()> {
    info!("Generating forecast report from {}", ledger.collection());

    let pb = ui::new_spinner("Fetching financial records...");
    let result = ledger.report(params).await;
    pb.finish_and_clear();

    match result {
        Ok((forecast, summary)) => {
            println!("{}", render_forecast(&forecast, currency));
            println!();
            println!("{}", render_summary(&summary, currency));
            Ok(())
        }
        Err(ForecastError::EmptyDataset) => {
            println!("{NO_DATA_MESSAGE}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
