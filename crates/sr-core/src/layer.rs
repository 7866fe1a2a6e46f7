//! The fixed, ordered layer list and the one-time name → handle table.

use crate::config::RevealConfig;
use crate::page::Page;
use smallvec::SmallVec;

/// Inkscape layer labels, in page order.
pub const LAYER_NAMES: [&str; 15] = [
    "0000P0", "0001P1", "0002P2", "0003D0", "0004D1", "0005P3", "0006P4", "0007D3", "0008D4",
    "0009P5", "0010P6", "0011D5", "0012D6", "0013D7", "0014D8",
];

pub const LAYER_COUNT: usize = LAYER_NAMES.len();

/// Whether `label` is one of [`LAYER_NAMES`].
pub fn is_layer_name(label: &str) -> bool {
    LAYER_NAMES.iter().any(|name| *name == label)
}

/// Attribute stamped on each prepared layer with its zero-based index.
pub const INDEX_ATTRIBUTE: &str = "data-layer-index";

/// Resolved layer handles, addressed by layer index.
///
/// Built once by [`prepare_layers`]; a `None` slot is a layer the SVG did
/// not contain.
#[derive(Debug, Clone)]
pub struct LayerTable<H> {
    slots: SmallVec<[Option<H>; LAYER_COUNT]>,
}

impl<H> LayerTable<H> {
    pub fn get(&self, index: usize) -> Option<&H> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Number of layers that were found.
    pub fn found_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Labels of layers absent from the SVG, in page order.
    pub fn missing_names(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .zip(LAYER_NAMES)
            .filter(|(slot, _)| slot.is_none())
            .map(|(_, name)| name)
            .collect()
    }

    /// `(index, handle)` for every found layer.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &H)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|h| (i, h)))
    }
}

/// Locate every layer under `root`, hide it, and enable the fade transition.
///
/// Missing layers are logged and skipped; they stay hidden for the page's
/// lifetime.
pub fn prepare_layers<P: Page>(
    page: &mut P,
    root: &P::Element,
    config: &RevealConfig,
) -> LayerTable<P::Element> {
    let transition = config.transition_css();
    let mut slots = SmallVec::new();

    for (index, name) in LAYER_NAMES.iter().enumerate() {
        let Some(layer) = page.find_layer(root, name) else {
            log::warn!("layer not found: {name}");
            slots.push(None);
            continue;
        };

        page.set_style(&layer, "opacity", "0");
        page.set_style(&layer, "transition", &transition);
        page.set_style(&layer, "will-change", "opacity");
        page.set_attribute(&layer, INDEX_ATTRIBUTE, &index.to_string());
        log::info!("layer {}/{LAYER_COUNT}: {name}", index + 1);

        slots.push(Some(layer));
    }

    LayerTable { slots }
}
