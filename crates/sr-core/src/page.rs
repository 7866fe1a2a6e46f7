//! Host document abstraction.
//!
//! The session never touches the DOM directly. The browser bridge implements
//! [`Page`] over `web-sys`; [`crate::memory::MemoryPage`] implements it over
//! parsed markup for tests and the command-line checker.

/// Scroll geometry of the scroll container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Scrollable range (`scrollHeight - clientHeight`).
    pub fn range(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// The two numeric page-counter displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageLabel {
    Current,
    Total,
}

/// Operations the effect needs from the host page.
///
/// `Element` is a cheap handle (a DOM node, an index into parsed markup).
pub trait Page {
    type Element: Clone;

    /// Replace the image placeholder's contents with `markup`.
    fn inject_markup(&mut self, markup: &str);

    /// First `<svg>` element inside the placeholder.
    fn find_svg_root(&self) -> Option<Self::Element>;

    /// A `<g>` under `root` whose `inkscape:label` equals `label`.
    fn find_layer(&self, root: &Self::Element, label: &str) -> Option<Self::Element>;

    /// Set an inline style property (kebab-case name).
    fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Set the CSS height of the scroll content (e.g. `"1600vh"`).
    fn set_content_height(&mut self, height: &str);

    fn scroll_metrics(&self) -> ScrollMetrics;

    fn set_scroll_top(&mut self, top: f64);

    /// Set the CSS width of the progress fill (e.g. `"42%"`).
    fn set_progress_width(&mut self, width: &str);

    fn set_label(&mut self, label: PageLabel, text: &str);

    /// Signal readiness (the browser adds a `loaded` class to `<body>`).
    fn mark_loaded(&mut self);
}
