use super::ui;
use crate::core::Ledger;
use crate::core::analytics::checked_total;
use crate::core::payables::{DueStatus, Payable};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Color};

pub fn render_payables(payables: &[Payable], currency: &str) -> String {
    if payables.is_empty() {
        return ui::style_text("Nenhuma conta a pagar.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Descrição"),
        ui::header_cell("Vencimento"),
        ui::header_cell("Valor"),
        ui::header_cell("Status"),
    ]);

    for payable in payables {
        let status = Cell::new(payable.status.to_string());
        let status = match payable.status {
            DueStatus::Overdue => status.fg(Color::Red),
            DueStatus::DueToday => status.fg(Color::Yellow),
            DueStatus::DueIn(_) => status.fg(Color::Blue),
        };
        table.add_row(vec![
            Cell::new(&payable.description),
            Cell::new(payable.due_date.format("%d/%m/%Y")),
            ui::expense_cell(payable.amount, currency),
            status,
        ]);
    }

    let total = match checked_total(payables.iter().map(|p| p.amount), "a_pagar") {
        Ok(total) => format!("{currency} {total:.2}"),
        Err(_) => "N/A".to_string(),
    };
    format!(
        "{}\n\n{}: {}",
        table,
        ui::style_text("Total a pagar", ui::StyleType::TotalLabel),
        ui::style_text(&total, ui::StyleType::Warning)
    )
}

pub async fn run(ledger: &Ledger, today: NaiveDate, currency: &str) -> Result<()> {
    let pb = ui::new_spinner("Fetching financial records...");
    let result = ledger.payables(today).await;
    pb.finish_and_clear();

    println!("{}", render_payables(&result?, currency));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_payables() {
        let payables = vec![
            Payable {
                description: "Conta de luz".to_string(),
                amount: dec!(485),
                due_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
                status: DueStatus::Overdue,
            },
            Payable {
                description: "Farinha".to_string(),
                amount: dec!(320.5),
                due_date: NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
                status: DueStatus::DueIn(3),
            },
        ];
        let output = console::strip_ansi_codes(&render_payables(&payables, "R$")).to_string();

        assert!(output.contains("Conta de luz"));
        assert!(output.contains("14/02/2026"));
        assert!(output.contains("Vencida"));
        assert!(output.contains("Em 3 dias"));
        assert!(output.contains("Total a pagar: R$ 805.50"));
    }

    #[test]
    fn test_render_payables_total_out_of_range() {
        let payable = Payable {
            description: "Maquinário".to_string(),
            amount: dec!(50000000000000000000000000000),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            status: DueStatus::DueToday,
        };
        let payables = vec![payable.clone(), payable];
        let output = console::strip_ansi_codes(&render_payables(&payables, "R$")).to_string();

        assert!(output.contains("Maquinário"));
        assert!(output.contains("Total a pagar: N/A"));
    }

    #[test]
    fn test_render_no_payables() {
        let output = console::strip_ansi_codes(&render_payables(&[], "R$")).to_string();
        assert_eq!(output, "Nenhuma conta a pagar.");
    }
}
