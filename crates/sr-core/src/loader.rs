//! Validating and installing the fetched SVG.
//!
//! The network fetch itself belongs to the host (the browser bridge awaits
//! `window.fetch`); this module owns everything after the response arrives.

use crate::error::RevealError;
use crate::page::Page;

/// A completed HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedResource {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl FetchedResource {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    /// Mirrors `Response.ok`: any 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Check the response, inject its markup, and return the `<svg>` root.
///
/// Fails with [`RevealError::Load`] on a non-2xx status (nothing is injected)
/// and with [`RevealError::Structure`] when the markup has no root.
pub fn load_svg<P: Page>(page: &mut P, resource: &FetchedResource) -> Result<P::Element, RevealError> {
    if !resource.is_ok() {
        return Err(RevealError::Load {
            status: Some(resource.status),
            message: resource.status_text.clone(),
        });
    }
    log::debug!("SVG text length: {}", resource.body.len());

    page.inject_markup(&resource.body);
    let root = page
        .find_svg_root()
        .ok_or_else(|| RevealError::Structure("no root element".to_string()))?;

    log::info!(
        "SVG loaded: viewBox={:?} size={}x{}",
        page.attribute(&root, "viewBox").unwrap_or_default(),
        page.attribute(&root, "width").unwrap_or_default(),
        page.attribute(&root, "height").unwrap_or_default(),
    );

    page.set_style(&root, "display", "block");
    page.set_style(&root, "max-width", "100%");
    page.set_style(&root, "max-height", "100%");

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPage;

    #[test]
    fn status_range() {
        let mut res = FetchedResource::ok("");
        assert!(res.is_ok());
        res.status = 204;
        assert!(res.is_ok());
        res.status = 304;
        assert!(!res.is_ok());
        res.status = 404;
        assert!(!res.is_ok());
    }

    #[test]
    fn not_found_injects_nothing() {
        let mut page = MemoryPage::new(800.0);
        let res = FetchedResource {
            status: 404,
            status_text: "Not Found".to_string(),
            body: "<svg/>".to_string(),
        };
        let err = load_svg(&mut page, &res).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
        assert!(page.find_svg_root().is_none());
    }

    #[test]
    fn body_without_svg_is_structure_error() {
        let mut page = MemoryPage::new(800.0);
        let err = load_svg(&mut page, &FetchedResource::ok("<html><p>hi</p></html>")).unwrap_err();
        assert_eq!(err, RevealError::Structure("no root element".to_string()));
    }

    #[test]
    fn root_is_sized_to_fit() {
        let mut page = MemoryPage::new(800.0);
        let root = load_svg(&mut page, &FetchedResource::ok(r#"<svg width="10"/>"#)).unwrap();
        assert_eq!(page.style(root, "display"), Some("block"));
        assert_eq!(page.style(root, "max-width"), Some("100%"));
        assert_eq!(page.style(root, "max-height"), Some("100%"));
    }
}
