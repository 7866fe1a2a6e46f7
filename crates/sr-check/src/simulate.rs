//! Scroll-through simulation against the in-memory page.

use serde::Serialize;
use sr_core::layer::LAYER_NAMES;
use sr_core::{FetchedResource, MemoryPage, Page, RevealConfig, RevealError, Session};

/// State after one simulated scroll event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRow {
    pub scroll_top: f64,
    pub percent: f64,
    pub page: u32,
    pub visible: Vec<&'static str>,
}

/// Initialize a session over `markup` and scroll from top to bottom in
/// `steps` equal increments (`steps + 1` rows, both ends included).
pub fn simulate(
    markup: &str,
    config: RevealConfig,
    viewport_height: f64,
    steps: u32,
) -> Result<Vec<SimulationRow>, RevealError> {
    let mut page = MemoryPage::new(viewport_height);
    let mut session = Session::initialize(&mut page, config, &FetchedResource::ok(markup))?;

    let range = page.max_scroll();
    let steps = steps.max(1);
    log::debug!("simulating {steps} steps over {range}px");
    let mut rows = Vec::with_capacity(steps as usize + 1);

    for step in 0..=steps {
        page.set_scroll_top(range * f64::from(step) / f64::from(steps));
        let state = session.on_scroll(&mut page);
        let visible = session
            .layers()
            .iter()
            .filter(|(_, el)| page.style(**el, "opacity") == Some("1"))
            .map(|(i, _)| LAYER_NAMES[i])
            .collect();
        rows.push(SimulationRow {
            scroll_top: page.scroll_metrics().scroll_top,
            percent: state.percent,
            page: state.page,
            visible,
        });
    }

    Ok(rows)
}
