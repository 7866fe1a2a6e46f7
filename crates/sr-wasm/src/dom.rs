//! [`Page`] over the real DOM.

use serde::Deserialize;
use sr_core::{Page, PageLabel, RevealError, ScrollMetrics};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement};

use crate::fetch::js_error_message;

/// Where the host page keeps the elements the effect drives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// `id` of the scrollable container.
    pub scroll_container_id: String,
    /// `id` of the placeholder that receives the SVG markup.
    pub svg_wrapper_id: String,
    /// Selector, within the container, of the element sized to the sequence.
    pub scroll_content: String,
    pub progress_fill: String,
    pub current_page: String,
    pub total_pages: String,
    /// Class added to `<body>` once initialization succeeds.
    pub loaded_class: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            scroll_container_id: "scrollContainer".to_string(),
            svg_wrapper_id: "svgWrapper".to_string(),
            scroll_content: ".scroll-content".to_string(),
            progress_fill: ".progress-bar-fill".to_string(),
            current_page: ".current-page".to_string(),
            total_pages: ".total-pages".to_string(),
            loaded_class: "loaded".to_string(),
        }
    }
}

/// Handles to the host page's elements, looked up once.
pub struct DomPage {
    document: Document,
    container: HtmlElement,
    content: HtmlElement,
    wrapper: Element,
    progress_fill: HtmlElement,
    current_page: Element,
    total_pages: Element,
    loaded_class: String,
}

impl DomPage {
    /// Find every element the effect needs, failing on the first absent one.
    pub fn locate(document: &Document, selectors: &PageSelectors) -> Result<Self, RevealError> {
        let container = as_html(
            by_id(document, &selectors.scroll_container_id)?,
            &selectors.scroll_container_id,
        )?;
        let content = as_html(
            query(&container, &selectors.scroll_content)?,
            &selectors.scroll_content,
        )?;
        let wrapper = by_id(document, &selectors.svg_wrapper_id)?;
        let html = document
            .document_element()
            .ok_or_else(|| RevealError::Host("document has no root element".to_string()))?;
        let progress_fill = as_html(
            query(&html, &selectors.progress_fill)?,
            &selectors.progress_fill,
        )?;
        let current_page = query(&html, &selectors.current_page)?;
        let total_pages = query(&html, &selectors.total_pages)?;

        Ok(Self {
            document: document.clone(),
            container,
            content,
            wrapper,
            progress_fill,
            current_page,
            total_pages,
            loaded_class: selectors.loaded_class.clone(),
        })
    }

    /// The element scroll events are dispatched on.
    pub fn scroll_container(&self) -> &HtmlElement {
        &self.container
    }
}

fn by_id(document: &Document, id: &str) -> Result<Element, RevealError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| RevealError::MissingElement(format!("#{id}")))
}

fn query(scope: &Element, selector: &str) -> Result<Element, RevealError> {
    scope
        .query_selector(selector)
        .map_err(|e| RevealError::Host(format!("bad selector {selector}: {}", js_error_message(&e))))?
        .ok_or_else(|| RevealError::MissingElement(selector.to_string()))
}

fn as_html(element: Element, selector: &str) -> Result<HtmlElement, RevealError> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| RevealError::MissingElement(format!("{selector} (not an HTML element)")))
}

/// Inline style of an HTML or SVG element.
fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(SvgElement::style)
}

fn set_property(style: &CssStyleDeclaration, property: &str, value: &str) {
    if let Err(e) = style.set_property(property, value) {
        log::warn!("failed to set {property}: {}", js_error_message(&e));
    }
}

/// `querySelector` for a `<g>` by Inkscape label; the colon must be escaped.
fn layer_selector(label: &str) -> String {
    format!(r#"g[inkscape\:label="{label}"]"#)
}

impl Page for DomPage {
    type Element = Element;

    fn inject_markup(&mut self, markup: &str) {
        self.wrapper.set_inner_html(markup);
    }

    fn find_svg_root(&self) -> Option<Element> {
        self.wrapper.query_selector("svg").ok().flatten()
    }

    fn find_layer(&self, root: &Element, label: &str) -> Option<Element> {
        match root.query_selector(&layer_selector(label)) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("layer query for {label} failed: {}", js_error_message(&e));
                None
            }
        }
    }

    fn set_style(&mut self, element: &Element, property: &str, value: &str) {
        match style_of(element) {
            Some(style) => set_property(&style, property, value),
            None => log::warn!("<{}> has no inline style", element.tag_name()),
        }
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            log::warn!("failed to set attribute {name}: {}", js_error_message(&e));
        }
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_content_height(&mut self, height: &str) {
        set_property(&self.content.style(), "height", height);
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: f64::from(self.container.scroll_top()),
            scroll_height: f64::from(self.container.scroll_height()),
            client_height: f64::from(self.container.client_height()),
        }
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.container.set_scroll_top(top.round() as i32);
    }

    fn set_progress_width(&mut self, width: &str) {
        set_property(&self.progress_fill.style(), "width", width);
    }

    fn set_label(&mut self, label: PageLabel, text: &str) {
        let element = match label {
            PageLabel::Current => &self.current_page,
            PageLabel::Total => &self.total_pages,
        };
        element.set_text_content(Some(text));
    }

    fn mark_loaded(&mut self) {
        let Some(body) = self.document.body() else {
            log::warn!("no <body> to mark as loaded");
            return;
        };
        if let Err(e) = body.class_list().add_1(&self.loaded_class) {
            log::warn!("failed to add body class: {}", js_error_message(&e));
        }
    }
}
