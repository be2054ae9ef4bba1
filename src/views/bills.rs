//! Bill list screen: loading, error or table

use maud::{html, Markup};
use std::cmp::Ordering;
use tracing::warn;

use crate::format::{format_amount, format_date, format_status, parse_date, status_class};
use crate::models::Bill;
use crate::views::actions::render_actions;

/// What the list screen currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum BillsState {
    Loading,
    Error(String),
    Ready(Vec<Bill>),
}

impl BillsState {
    pub fn is_ready(&self) -> bool {
        matches!(self, BillsState::Ready(_))
    }
}

/// Render exactly one of the loading, error or table fragments
pub fn render(state: &BillsState) -> Markup {
    match state {
        BillsState::Loading => loading_page(),
        BillsState::Error(message) => error_page(message),
        BillsState::Ready(bills) => bills_page(bills),
    }
}

pub fn loading_page() -> Markup {
    html! {
        div id="loading" data-testid="loading" class="loading" { "Loading..." }
    }
}

pub fn error_page(message: &str) -> Markup {
    html! {
        div id="error" class="error" {
            div class="content-title" { "Erreur" }
            div data-testid="error-message" class="error-message" { (message) }
        }
    }
}

fn bills_page(bills: &[Bill]) -> Markup {
    let rows = sort_by_date_desc(bills);

    html! {
        div class="content" {
            div class="content-header" {
                div class="content-title" { "Mes notes de frais" }
                button type="button" data-testid="btn-new-bill" class="btn btn-primary" {
                    "Nouvelle note de frais"
                }
            }
            div id="data-table" {
                table id="example" class="table table-striped" style="width:100%" {
                    thead {
                        tr {
                            th { "Type" }
                            th { "Nom" }
                            th { "Date" }
                            th { "Montant" }
                            th { "Statut" }
                            th { "Actions" }
                        }
                    }
                    tbody data-testid="tbody" {
                        @for bill in rows {
                            (bill_row(bill))
                        }
                    }
                }
            }
        }
        (receipt_modal(None, false))
    }
}

fn bill_row(bill: &Bill) -> Markup {
    let date = format_date(&bill.date).unwrap_or_else(|e| {
        warn!("{} for bill {}", e, bill.id);
        bill.date.clone()
    });

    html! {
        tr data-testid="bill-row" data-bill-id=(bill.id) {
            td { (bill.bill_type.as_str()) }
            td { (bill.name) }
            td data-testid="bill-date" data-date=(bill.date) { (date) }
            td { (format_amount(bill.amount)) }
            td class=(status_class(&bill.status)) { (format_status(&bill.status)) }
            td { (render_actions(bill)) }
        }
    }
}

/// Most recent first; bills whose date does not parse go last
pub fn sort_by_date_desc(bills: &[Bill]) -> Vec<&Bill> {
    let mut sorted: Vec<&Bill> = bills.iter().collect();
    sorted.sort_by(|a, b| match (parse_date(&a.date), parse_date(&b.date)) {
        (Ok(a), Ok(b)) => b.cmp(&a),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => b.date.cmp(&a.date),
    });
    sorted
}

/// Receipt modal container. The list screen renders it closed and empty.
pub fn receipt_modal(body: Option<&Markup>, open: bool) -> Markup {
    let class = if open { "modal fade show" } else { "modal fade" };

    html! {
        div class=(class) id="modaleFile" data-testid="modaleFile" tabindex="-1" role="dialog"
            aria-hidden=(if open { "false" } else { "true" })
        {
            div class="modal-dialog modal-dialog-centered modal-lg" role="document" {
                div class="modal-content" {
                    div class="modal-header" {
                        h5 class="modal-title" { "Justificatif" }
                        button type="button" class="close" data-dismiss="modal" aria-label="Close" {
                            span aria-hidden="true" { "×" }
                        }
                    }
                    div class="modal-body" {
                        @if let Some(body) = body {
                            (body)
                        }
                    }
                }
            }
        }
    }
}

/// Receipt image, or a placeholder when the bill has no file URL
pub fn receipt_preview(url: Option<&str>, name: Option<&str>, width: u32) -> Markup {
    html! {
        div class="bill-proof-container" style="text-align: center;" {
            @match url {
                Some(url) => {
                    img width=(width) src=(url) alt=(name.unwrap_or("Bill"));
                }
                None => {
                    p class="bill-proof-missing" { "Aucun justificatif disponible" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::page::RenderTarget;

    fn rendered(state: &BillsState) -> RenderTarget {
        let mut target = RenderTarget::new();
        target.render(render(state));
        target
    }

    #[test]
    fn test_rows_are_ordered_most_recent_first() {
        let target = rendered(&BillsState::Ready(fixtures::bills()));
        let dates = target.attribute_values("[data-testid=\"bill-date\"]", "data-date").unwrap();
        assert_eq!(dates, vec!["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]);

        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_unparseable_dates_render_raw_and_sort_last() {
        let mut bills = fixtures::bills();
        bills[0].date = "corrupted".to_string();
        let sorted = sort_by_date_desc(&bills);
        assert_eq!(sorted.last().unwrap().date, "corrupted");

        let target = rendered(&BillsState::Ready(bills));
        assert!(target.text_of("[data-testid=\"bill-date\"]").unwrap().contains(&"corrupted".to_string()));
    }

    #[test]
    fn test_loading_page() {
        let target = rendered(&BillsState::Loading);
        assert!(target.html().contains("Loading..."));
        assert_eq!(target.count("[data-testid=\"bill-row\"]").unwrap(), 0);
    }

    #[test]
    fn test_error_page_shows_literal_message() {
        let target = rendered(&BillsState::Error("some error message".to_string()));
        assert!(target.html().contains("Erreur"));
        assert_eq!(
            target.text_of("[data-testid=\"error-message\"]").unwrap(),
            vec!["some error message".to_string()]
        );
        assert_eq!(target.count("[data-testid=\"bill-row\"]").unwrap(), 0);
    }

    #[test]
    fn test_row_shows_formatted_values() {
        let target = rendered(&BillsState::Ready(fixtures::bills()));
        let html = target.html();
        assert!(html.contains("4 Avr. 04"));
        assert!(html.contains("400 €"));
        assert!(html.contains("En attente"));
        assert!(html.contains("Accepté"));
        assert!(html.contains("Refusé"));
        assert_eq!(target.count("[data-testid=\"icon-eye\"]").unwrap(), 4);
    }

    #[test]
    fn test_unknown_status_rendering() {
        let mut bills = fixtures::bills();
        bills[0].status = crate::models::BillStatus::Unknown("archived".into());
        let target = rendered(&BillsState::Ready(bills));
        assert!(target.html().contains("Statut inconnu"));
        assert!(target.html().contains("status-unknown"));
    }

    #[test]
    fn test_receipt_preview_placeholder() {
        let markup = receipt_preview(None, None, 400).into_string();
        assert!(markup.contains("Aucun justificatif disponible"));
        assert!(!markup.contains("<img"));
    }
}
