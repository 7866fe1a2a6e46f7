//! WASM bridge for Scroll Reveal. Drives the layered SVG from the page DOM.
//!
//! Compiled via `wasm-pack build --target web`; initialization starts as soon
//! as the module is instantiated.

mod console;
mod dom;
mod fetch;

pub use dom::{DomPage, PageSelectors};

use sr_core::lint::has_errors;
use sr_core::{RevealConfig, RevealError, Session, lint_markup};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

/// `id` of an optional `<script type="application/json">` holding overrides
/// for both [`RevealConfig`] and [`PageSelectors`].
const CONFIG_ELEMENT_ID: &str = "scroll-reveal-config";

/// Page handles plus session, shared by the scroll and timer callbacks.
struct App {
    page: DomPage,
    session: Session<DomPage>,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook_setup();
    console::init(log::LevelFilter::Debug);

    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = run().await {
            report_failure(&err);
        }
    });
}

/// Fetch the SVG, initialize the session, and wire up scrolling.
async fn run() -> Result<(), RevealError> {
    log::info!("starting initialization");

    let window = web_sys::window().ok_or_else(|| RevealError::Host("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| RevealError::Host("no document".to_string()))?;

    let (config, selectors) = read_config(&document)?;
    let mut page = DomPage::locate(&document, &selectors)?;

    let resource = fetch::fetch_svg(&window, &config.svg_path).await?;
    let session = Session::initialize(&mut page, config, &resource)?;
    let reset_delay = session.config().reset_delay_ms;

    let app = Rc::new(RefCell::new(App { page, session }));
    attach_scroll_listener(&app)?;
    schedule_scroll_reset(&window, &app, reset_delay)?;

    log::info!("initialization complete");
    Ok(())
}

fn read_config(document: &Document) -> Result<(RevealConfig, PageSelectors), RevealError> {
    let json = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    parse_config(json.as_deref())
}

/// Both halves of the config from one JSON object; `None` means defaults.
fn parse_config(json: Option<&str>) -> Result<(RevealConfig, PageSelectors), RevealError> {
    let Some(json) = json.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok((RevealConfig::default(), PageSelectors::default()));
    };
    let config = RevealConfig::from_json(json)?;
    let selectors = serde_json::from_str(json).map_err(|e| RevealError::Config(e.to_string()))?;
    Ok((config, selectors))
}

/// One listener for the page's lifetime.
fn attach_scroll_listener(app: &Rc<RefCell<App>>) -> Result<(), RevealError> {
    let target = app.borrow().page.scroll_container().clone();
    let handler_app = Rc::clone(app);

    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        let Ok(mut guard) = handler_app.try_borrow_mut() else {
            return;
        };
        let App { page, session } = &mut *guard;
        session.on_scroll(page);
    });

    target
        .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
        .map_err(|e| RevealError::Host(format!("scroll listener: {}", fetch::js_error_message(&e))))?;
    on_scroll.forget();
    Ok(())
}

/// Rewind to the top again `delay_ms` after initialization.
fn schedule_scroll_reset(
    window: &Window,
    app: &Rc<RefCell<App>>,
    delay_ms: i32,
) -> Result<(), RevealError> {
    let handler_app = Rc::clone(app);
    let callback = Closure::once_into_js(move || {
        let Ok(mut guard) = handler_app.try_borrow_mut() else {
            return;
        };
        let App { page, session } = &mut *guard;
        session.reset_scroll(page);
    });

    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay_ms)
        .map_err(|e| RevealError::Host(format!("reset timer: {}", fetch::js_error_message(&e))))?;
    Ok(())
}

fn failure_message(err: &RevealError) -> String {
    format!("Initialization failed: {err}\n\nCheck the console for details.")
}

fn report_failure(err: &RevealError) {
    log::error!("initialization failed: {err}");
    let Some(window) = web_sys::window() else {
        log::warn!("no window to show the failure alert");
        return;
    };
    if let Err(e) = window.alert_with_message(&failure_message(err)) {
        log::warn!("failed to show alert: {}", fetch::js_error_message(&e));
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Scroll Reveal panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no page needed) ──────────────────────────────

/// Lint SVG markup against the layer list.
/// Returns JSON `{"ok":bool,"diagnostics":[{"rule","severity","message"}]}`.
#[wasm_bindgen]
pub fn validate_svg(markup: &str) -> String {
    let diagnostics = lint_markup(markup);
    let ok = !has_errors(&diagnostics);
    serde_json::json!({ "ok": ok, "diagnostics": diagnostics }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sr_core::LAYER_NAMES;

    #[test]
    fn no_config_element_means_defaults() {
        let (config, selectors) = parse_config(None).unwrap();
        assert_eq!(config, RevealConfig::default());
        assert_eq!(selectors, PageSelectors::default());

        let (config, _) = parse_config(Some("  \n ")).unwrap();
        assert_eq!(config, RevealConfig::default());
    }

    #[test]
    fn one_object_feeds_both_halves() {
        let json = r#"{"svg_path":"story.svg","scroll_container_id":"reader"}"#;
        let (config, selectors) = parse_config(Some(json)).unwrap();
        assert_eq!(config.svg_path, "story.svg");
        assert_eq!(selectors.scroll_container_id, "reader");
    }

    #[test]
    fn bad_config_is_reported() {
        let err = parse_config(Some("[1, 2")).unwrap_err();
        assert!(matches!(err, RevealError::Config(_)));
    }

    #[test]
    fn failure_message_carries_status() {
        let err = RevealError::Load {
            status: Some(404),
            message: "Not Found".to_string(),
        };
        let msg = failure_message(&err);
        assert!(msg.starts_with("Initialization failed: SVG load failed: 404 Not Found"));
        assert!(msg.ends_with("Check the console for details."));
    }

    #[test]
    fn validate_complete_svg() {
        let groups: String = LAYER_NAMES
            .iter()
            .map(|l| format!(r#"<g inkscape:label="{l}"/>"#))
            .collect();
        let json = validate_svg(&format!("<svg>{groups}</svg>"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn validate_page_without_svg() {
        let value: serde_json::Value =
            serde_json::from_str(&validate_svg("<p>Not Found</p>")).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["diagnostics"][0]["rule"], "no-svg-root");
        assert_eq!(value["diagnostics"][0]["severity"], "error");
    }
}
