//! Scroll container sizing.

use crate::config::RevealConfig;
use crate::layer::LAYER_COUNT;
use crate::page::Page;

/// Height of the scroll content in `vh`: one span per layer plus a tail so
/// the last layer lands before the end of the scroll.
pub fn content_height_vh(config: &RevealConfig) -> u32 {
    LAYER_COUNT as u32 * config.scroll_height_per_layer + config.tail_margin
}

/// Size the scroll content and rewind to the top.
pub fn configure_container<P: Page>(page: &mut P, config: &RevealConfig) {
    let height = content_height_vh(config);
    page.set_content_height(&format!("{height}vh"));
    page.set_scroll_top(0.0);
    log::debug!("scroll height: {height}vh");
    log::debug!("initial scroll top: {}px", page.scroll_metrics().scroll_top);
}
