//! Page → layer opacity.

use crate::layer::LayerTable;
use crate::page::Page;

/// Whether layer `index` is shown at `current_page`.
pub fn is_revealed(index: usize, current_page: u32) -> bool {
    index < current_page as usize
}

/// Show every layer before `current_page`, hide the rest.
///
/// Layers missing from the table are skipped. Calling twice with the same
/// page writes the same values.
pub fn show_layers_up_to<P: Page>(
    page: &mut P,
    layers: &LayerTable<P::Element>,
    current_page: u32,
) {
    for (index, layer) in layers.iter() {
        let opacity = if is_revealed(index, current_page) {
            "1"
        } else {
            "0"
        };
        page.set_style(layer, "opacity", opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::layer::{LAYER_COUNT, LAYER_NAMES, prepare_layers};
    use crate::memory::MemoryPage;

    fn full_page() -> (MemoryPage, LayerTable<usize>) {
        let groups: String = LAYER_NAMES
            .iter()
            .map(|l| format!(r#"<g inkscape:label="{l}"/>"#))
            .collect();
        let mut page = MemoryPage::new(800.0);
        page.inject_markup(&format!("<svg>{groups}</svg>"));
        let root = page.find_svg_root().unwrap();
        let table = prepare_layers(&mut page, &root, &RevealConfig::default());
        (page, table)
    }

    fn visible(page: &MemoryPage, table: &LayerTable<usize>) -> Vec<usize> {
        table
            .iter()
            .filter(|(_, el)| page.style(**el, "opacity") == Some("1"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn layer_visible_iff_index_below_page() {
        let (mut page, table) = full_page();
        for current in 1..=LAYER_COUNT as u32 {
            show_layers_up_to(&mut page, &table, current);
            let expected: Vec<usize> = (0..current as usize).collect();
            assert_eq!(visible(&page, &table), expected, "page {current}");
        }
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let (mut page, table) = full_page();
        show_layers_up_to(&mut page, &table, 6);
        let first = visible(&page, &table);
        show_layers_up_to(&mut page, &table, 6);
        assert_eq!(visible(&page, &table), first);
    }

    #[test]
    fn scrolling_back_hides_again() {
        let (mut page, table) = full_page();
        show_layers_up_to(&mut page, &table, 15);
        show_layers_up_to(&mut page, &table, 2);
        assert_eq!(visible(&page, &table), vec![0, 1]);
    }

    #[test]
    fn page_zero_shows_nothing() {
        assert!(!is_revealed(0, 0));
        assert!(is_revealed(0, 1));
        assert!(!is_revealed(1, 1));
        assert!(is_revealed(14, 15));
    }
}
