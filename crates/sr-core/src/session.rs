//! The controller that owns the loaded image and sequences the phases.
//!
//! `initialize` runs loader → preparer → configurator → tracker once and
//! fails fast; afterwards the host forwards every scroll event to
//! [`Session::on_scroll`].

use crate::config::RevealConfig;
use crate::error::RevealError;
use crate::layer::{LAYER_COUNT, LayerTable, prepare_layers};
use crate::loader::{FetchedResource, load_svg};
use crate::page::{Page, PageLabel};
use crate::progress::ProgressState;
use crate::reveal::show_layers_up_to;
use crate::scroll::configure_container;

pub struct Session<P: Page> {
    config: RevealConfig,
    root: P::Element,
    layers: LayerTable<P::Element>,
    progress: ProgressState,
    /// Scroll events seen so far, saturating at the log limit.
    logged_events: u32,
}

impl<P: Page> Session<P> {
    /// Install the fetched SVG and bring the page to its initial state.
    ///
    /// On error nothing past the failing phase has run.
    pub fn initialize(
        page: &mut P,
        config: RevealConfig,
        resource: &FetchedResource,
    ) -> Result<Self, RevealError> {
        log::info!("initializing from {}", config.svg_path);

        let root = load_svg(page, resource)?;
        let layers = prepare_layers(page, &root, &config);
        configure_container(page, &config);

        let mut session = Self {
            config,
            root,
            layers,
            progress: ProgressState::initial(),
            logged_events: 0,
        };
        session.start_tracking(page);
        page.mark_loaded();

        log::info!(
            "initialized: {}/{LAYER_COUNT} layers",
            session.layers.found_count()
        );
        Ok(session)
    }

    /// Show the counters and the page-1 baseline.
    fn start_tracking(&mut self, page: &mut P) {
        page.set_label(PageLabel::Total, &LAYER_COUNT.to_string());

        let initial = ProgressState::initial();
        show_layers_up_to(page, &self.layers, initial.page);
        page.set_label(PageLabel::Current, &initial.page.to_string());
        page.set_progress_width(&initial.width_css());
        self.progress = initial;

        log::debug!("progress tracking ready, page {}", initial.page);
    }

    /// Recompute progress from the current scroll position and apply it.
    pub fn on_scroll(&mut self, page: &mut P) -> ProgressState {
        let progress = ProgressState::from_metrics(page.scroll_metrics());

        if self.logged_events < self.config.scroll_log_limit {
            self.logged_events += 1;
            log::debug!(
                "scroll event #{}: {:.2}%",
                self.logged_events,
                progress.percent
            );
        }

        page.set_progress_width(&progress.width_css());
        page.set_label(PageLabel::Current, &progress.page.to_string());
        show_layers_up_to(page, &self.layers, progress.page);

        self.progress = progress;
        progress
    }

    /// Force the scroll container back to the top.
    pub fn reset_scroll(&self, page: &mut P) {
        page.set_scroll_top(0.0);
        log::debug!("scroll position reset to top");
    }

    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    pub fn layers(&self) -> &LayerTable<P::Element> {
        &self.layers
    }

    pub fn root(&self) -> &P::Element {
        &self.root
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }
}
