//! Overlay surface used to preview receipts without leaving the screen

use maud::Markup;
use tracing::debug;

use crate::views::bills::receipt_modal;

/// Transient surface opened over the current screen
pub trait Overlay: Send {
    fn open(&mut self, content: Markup);
    fn close(&mut self);
    fn is_open(&self) -> bool;
    /// Width available to overlay content, in pixels
    fn width(&self) -> u32;
    /// Overlay markup in its current open/closed state
    fn render(&self) -> Markup;
}

/// Modal dialog holding the receipt preview
#[derive(Debug, Clone)]
pub struct ModalOverlay {
    width: u32,
    content: Option<Markup>,
}

impl ModalOverlay {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            content: None,
        }
    }

    pub fn content(&self) -> Option<&Markup> {
        self.content.as_ref()
    }
}

impl Overlay for ModalOverlay {
    fn open(&mut self, content: Markup) {
        debug!("Opening receipt overlay");
        self.content = Some(content);
    }

    fn close(&mut self) {
        self.content = None;
    }

    fn is_open(&self) -> bool {
        self.content.is_some()
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn render(&self) -> Markup {
        receipt_modal(self.content.as_ref(), self.is_open())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::html;

    #[test]
    fn test_open_and_close() {
        let mut overlay = ModalOverlay::new(800);
        assert!(!overlay.is_open());
        assert!(overlay.render().into_string().contains(r#"class="modal fade""#));

        overlay.open(html! { p { "receipt" } });
        assert!(overlay.is_open());
        let html = overlay.render().into_string();
        assert!(html.contains("modal fade show"));
        assert!(html.contains("<p>receipt</p>"));

        overlay.close();
        assert!(!overlay.is_open());
        assert!(overlay.content().is_none());
    }
}
