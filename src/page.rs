//! Rendering target owned by a controller for the lifetime of its screen

use maud::Markup;
use scraper::{ElementRef, Html, Selector};

use crate::errors::{BilledError, Result};

/// HTML subtree a controller renders into. Only its owner mutates it.
#[derive(Debug, Clone, Default)]
pub struct RenderTarget {
    html: String,
}

impl RenderTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the subtree with freshly rendered markup
    pub fn render(&mut self, markup: Markup) {
        self.html = markup.into_string();
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Number of elements matching `selector`
    pub fn count(&self, selector: &str) -> Result<usize> {
        self.query(selector, |elements| elements.count())
    }

    /// Value of `attr` on every matching element, empty when missing
    pub fn attribute_values(&self, selector: &str, attr: &str) -> Result<Vec<String>> {
        self.query(selector, |elements| {
            elements
                .map(|e| e.value().attr(attr).unwrap_or_default().to_string())
                .collect()
        })
    }

    /// Trimmed text content of every matching element
    pub fn text_of(&self, selector: &str) -> Result<Vec<String>> {
        self.query(selector, |elements| {
            elements
                .map(|e| e.text().collect::<String>().trim().to_string())
                .collect()
        })
    }

    /// Requested attributes of the `index`-th matching element, `None` if there is no such element
    pub fn nth_attributes(
        &self,
        selector: &str,
        index: usize,
        attrs: &[&str],
    ) -> Result<Option<Vec<Option<String>>>> {
        self.query(selector, |mut elements| {
            elements.nth(index).map(|e| {
                attrs
                    .iter()
                    .map(|attr| e.value().attr(attr).map(str::to_string))
                    .collect()
            })
        })
    }

    /// Whether the first matching element carries `class`
    pub fn has_class(&self, selector: &str, class: &str) -> Result<bool> {
        self.query(selector, |mut elements| {
            elements
                .next()
                .map(|e| e.value().classes().any(|c| c == class))
                .unwrap_or(false)
        })
    }

    fn query<T>(
        &self,
        selector: &str,
        f: impl for<'a> FnOnce(Box<dyn Iterator<Item = ElementRef<'a>> + 'a>) -> T,
    ) -> Result<T> {
        let parsed = Selector::parse(selector)
            .map_err(|e| BilledError::Selector(format!("{}: {:?}", selector, e)))?;
        let document = Html::parse_fragment(&self.html);
        let elements = Box::new(document.select(&parsed));
        Ok(f(elements))
    }
}
