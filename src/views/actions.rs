//! Per-row actions of the bill table

use maud::{html, Markup};

use crate::models::Bill;

/// "View receipt" control carrying the bill's file reference
pub fn render_actions(bill: &Bill) -> Markup {
    let url = bill.file_url.as_deref().unwrap_or_default();
    let name = bill.file_name.as_deref().unwrap_or_default();

    html! {
        div class="icon-actions" {
            div id="eye" data-testid="icon-eye" data-bill-url=(url) data-bill-name=(name)
                title="Voir le justificatif"
            {
                span class="icon icon-eye" aria-hidden="true" {}
            }
        }
    }
}
