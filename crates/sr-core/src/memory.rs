//! In-memory [`Page`] for tests and the command-line checker.
//!
//! Injected markup is scanned with [`crate::markup`]; element handles are
//! indices into the scanned element list. Style and attribute writes are
//! recorded so callers can inspect the resulting state. Scroll geometry is
//! derived from the content height the same way a browser would lay out a
//! `vh`-sized child inside a viewport-tall container.

use crate::markup::{SvgMarkup, parse_svg_markup};
use crate::page::{Page, PageLabel, ScrollMetrics};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    markup: SvgMarkup,
    styles: HashMap<(usize, String), String>,
    attributes: HashMap<(usize, String), String>,
    content_height: Option<String>,
    progress_width: Option<String>,
    labels: HashMap<PageLabel, String>,
    loaded: bool,
    /// Visible height of the scroll container, in px.
    pub client_height: f64,
    /// Total height of the scroll content, in px.
    pub scroll_height: f64,
    /// Current offset. Assign directly to simulate overscroll.
    pub scroll_top: f64,
}

impl MemoryPage {
    /// An empty page whose scroll container is `viewport_height` px tall.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            client_height: viewport_height,
            scroll_height: viewport_height,
            ..Self::default()
        }
    }

    pub fn markup(&self) -> &SvgMarkup {
        &self.markup
    }

    pub fn style(&self, element: usize, property: &str) -> Option<&str> {
        self.styles
            .get(&(element, property.to_string()))
            .map(String::as_str)
    }

    pub fn content_height(&self) -> Option<&str> {
        self.content_height.as_deref()
    }

    pub fn progress_width(&self) -> Option<&str> {
        self.progress_width.as_deref()
    }

    pub fn label(&self, label: PageLabel) -> Option<&str> {
        self.labels.get(&label).map(String::as_str)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Resolve a CSS length against this page's viewport. Only `vh` and `px`
    /// are understood.
    fn resolve_height(&self, height: &str) -> Option<f64> {
        if let Some(vh) = height.strip_suffix("vh") {
            return vh.trim().parse::<f64>().ok().map(|v| v / 100.0 * self.client_height);
        }
        height.strip_suffix("px")?.trim().parse::<f64>().ok()
    }
}

impl Page for MemoryPage {
    type Element = usize;

    fn inject_markup(&mut self, markup: &str) {
        self.styles.clear();
        self.attributes.clear();
        self.markup = match parse_svg_markup(markup) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("markup not understood, placeholder left empty: {e}");
                SvgMarkup::default()
            }
        };
    }

    fn find_svg_root(&self) -> Option<usize> {
        self.markup.root()
    }

    fn find_layer(&self, root: &usize, label: &str) -> Option<usize> {
        self.markup.find_group(*root, label)
    }

    fn set_style(&mut self, element: &usize, property: &str, value: &str) {
        self.styles
            .insert((*element, property.to_string()), value.to_string());
    }

    fn set_attribute(&mut self, element: &usize, name: &str, value: &str) {
        self.attributes
            .insert((*element, name.to_string()), value.to_string());
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        if let Some(value) = self.attributes.get(&(*element, name.to_string())) {
            return Some(value.clone());
        }
        self.markup.attribute(*element, name).map(str::to_string)
    }

    fn set_content_height(&mut self, height: &str) {
        match self.resolve_height(height) {
            // Content shorter than the container still fills it.
            Some(px) => self.scroll_height = px.max(self.client_height),
            None => log::warn!("unsupported content height {height:?}"),
        }
        self.content_height = Some(height.to_string());
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.scroll_top,
            scroll_height: self.scroll_height,
            client_height: self.client_height,
        }
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = top.clamp(0.0, self.max_scroll());
    }

    fn set_progress_width(&mut self, width: &str) {
        self.progress_width = Some(width.to_string());
    }

    fn set_label(&mut self, label: PageLabel, text: &str) {
        self.labels.insert(label, text.to_string());
    }

    fn mark_loaded(&mut self) {
        self.loaded = true;
    }
}
