//! Bill list controller

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::{BilledError, Result};
use crate::models::Bill;
use crate::navigation::{Navigator, Route};
use crate::overlay::Overlay;
use crate::page::RenderTarget;
use crate::store::BillStore;
use crate::views::bills::{self as bills_view, receipt_preview, BillsState};

const EYE_ICON_SELECTOR: &str = "[data-testid=\"icon-eye\"]";

/// Collaborators of the bill list screen.
///
/// `navigator` and `overlay` are required, `store` is optional: without it the
/// controller can only render bills it is given.
pub struct BillsConfig {
    pub target: RenderTarget,
    pub navigator: Option<Arc<dyn Navigator>>,
    pub overlay: Option<Box<dyn Overlay>>,
    pub store: Option<Arc<dyn BillStore>>,
}

impl BillsConfig {
    pub fn new(target: RenderTarget) -> Self {
        Self {
            target,
            navigator: None,
            overlay: None,
            store: None,
        }
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_overlay(mut self, overlay: Box<dyn Overlay>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn BillStore>) -> Self {
        self.store = Some(store);
        self
    }
}

pub struct BillsController {
    target: RenderTarget,
    navigator: Arc<dyn Navigator>,
    overlay: Box<dyn Overlay>,
    store: Option<Arc<dyn BillStore>>,
    state: BillsState,
}

impl BillsController {
    pub fn new(config: BillsConfig) -> Result<Self> {
        let navigator = config
            .navigator
            .ok_or(BilledError::MissingCollaborator("navigator"))?;
        let overlay = config
            .overlay
            .ok_or(BilledError::MissingCollaborator("overlay"))?;

        Ok(Self {
            target: config.target,
            navigator,
            overlay,
            store: config.store,
            state: BillsState::Loading,
        })
    }

    /// Render the given bills or error. With neither, fetch the list once.
    ///
    /// Never fails: fetch errors end up in the `Error` state with the upstream message.
    pub async fn initialize(&mut self, bills: Option<Vec<Bill>>, error: Option<String>) {
        match (bills, error) {
            (_, Some(message)) => self.set_state(BillsState::Error(message)),
            (Some(bills), None) => self.set_state(BillsState::Ready(bills)),
            (None, None) => {
                self.set_state(BillsState::Loading);
                let state = self.fetch().await;
                self.set_state(state);
            }
        }
    }

    async fn fetch(&self) -> BillsState {
        let Some(ref store) = self.store else {
            warn!("No storage client configured, cannot load bills");
            return BillsState::Error("Storage client unavailable".to_string());
        };

        match store.list().await {
            Ok(bills) => {
                info!("Loaded {} bills", bills.len());
                BillsState::Ready(bills)
            }
            Err(e) => {
                error!("Failed to load bills: {}", e);
                BillsState::Error(e.to_string())
            }
        }
    }

    pub fn on_new_bill_requested(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Open the overlay on the receipt referenced by the `row`-th eye icon
    pub fn on_view_receipt_requested(&mut self, row: usize) -> Result<()> {
        let attributes = self
            .target
            .nth_attributes(EYE_ICON_SELECTOR, row, &["data-bill-url", "data-bill-name"])?
            .ok_or(BilledError::RowNotFound(row))?;

        let mut attributes = attributes.into_iter().map(|value| {
            value.filter(|v| !v.is_empty() && v != "null" && v != "undefined")
        });
        let url = attributes.next().flatten();
        let name = attributes.next().flatten();

        let width = self.overlay.width() / 2;
        self.overlay
            .open(receipt_preview(url.as_deref(), name.as_deref(), width));
        Ok(())
    }

    pub fn on_close_receipt_requested(&mut self) {
        self.overlay.close();
    }

    pub fn state(&self) -> &BillsState {
        &self.state
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn overlay(&self) -> &dyn Overlay {
        self.overlay.as_ref()
    }

    fn set_state(&mut self, state: BillsState) {
        self.target.render(bills_view::render(&state));
        self.state = state;
    }
}
