//! `window.fetch` for the SVG.

use sr_core::{FetchedResource, RevealError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Fetch `path` and read the body as text.
///
/// A rejected promise (network down, CORS) is a load error without status.
/// Non-2xx responses are returned as-is with an empty body; the loader
/// turns them into load errors.
pub async fn fetch_svg(window: &Window, path: &str) -> Result<FetchedResource, RevealError> {
    log::info!("loading SVG: {path}");

    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(network_error)?
        .dyn_into()
        .map_err(network_error)?;

    let status = response.status();
    let status_text = response.status_text();
    if !response.ok() {
        return Ok(FetchedResource {
            status,
            status_text,
            body: String::new(),
        });
    }

    let text = response.text().map_err(network_error)?;
    let body = JsFuture::from(text)
        .await
        .map_err(network_error)?
        .as_string()
        .unwrap_or_default();

    Ok(FetchedResource {
        status,
        status_text,
        body,
    })
}

fn network_error(err: JsValue) -> RevealError {
    RevealError::Load {
        status: None,
        message: js_error_message(&err),
    }
}

/// Best-effort human-readable text for a thrown JS value.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
