//! Scroll offset → percentage → current page.

use crate::layer::LAYER_COUNT;
use crate::page::ScrollMetrics;
use serde::Serialize;

/// Percentage of the scrollable range traversed, in `[0, 100]`.
///
/// A zero (or negative) range means there is nothing to scroll; that reads as
/// the top of the sequence rather than a division by zero.
pub fn scroll_percent(offset: f64, range: f64) -> f64 {
    if range <= 0.0 {
        return 0.0;
    }
    let percent = offset / range * 100.0;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// 1-based page reached at `percent`, clamped to `[1, count]`.
pub fn current_page(percent: f64, count: usize) -> u32 {
    // Multiply first so `k/count` boundaries floor to `k`, not `k - 1`.
    page_from_ratio(percent * count.max(1) as f64 / 100.0, count)
}

/// 1-based page at scroll `offset` within `range`, computed without the
/// rounded percentage in between.
pub fn page_at(offset: f64, range: f64, count: usize) -> u32 {
    if range <= 0.0 || !offset.is_finite() {
        return 1;
    }
    page_from_ratio(offset * count.max(1) as f64 / range, count)
}

fn page_from_ratio(pages: f64, count: usize) -> u32 {
    let count = count.max(1) as f64;
    let page = pages.floor() + 1.0;
    // `clamp` keeps NaN; `max` turns it into 1.
    page.clamp(1.0, count).max(1.0) as u32
}

/// Scroll-derived state, recomputed from scratch on every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressState {
    pub percent: f64,
    pub page: u32,
}

impl ProgressState {
    /// State before any scrolling: top of the sequence.
    pub fn initial() -> Self {
        Self {
            percent: 0.0,
            page: 1,
        }
    }

    pub fn from_metrics(metrics: ScrollMetrics) -> Self {
        let range = metrics.range();
        Self {
            percent: scroll_percent(metrics.scroll_top, range),
            page: page_at(metrics.scroll_top, range, LAYER_COUNT),
        }
    }

    /// CSS width of the progress fill.
    pub fn width_css(&self) -> String {
        format!("{}%", self.percent)
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: f64, scroll_height: f64, client_height: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    #[test]
    fn top_is_page_one() {
        let state = ProgressState::from_metrics(metrics(0.0, 12800.0, 800.0));
        assert_eq!(state, ProgressState::initial());
        assert_eq!(state.width_css(), "0%");
    }

    #[test]
    fn bottom_is_last_page() {
        let state = ProgressState::from_metrics(metrics(12000.0, 12800.0, 800.0));
        assert_eq!(state.percent, 100.0);
        assert_eq!(state.page, 15);
        assert_eq!(state.width_css(), "100%");
    }

    #[test]
    fn halfway() {
        let state = ProgressState::from_metrics(metrics(6000.0, 12800.0, 800.0));
        assert_eq!(state.percent, 50.0);
        assert_eq!(state.page, 8);
        assert_eq!(state.width_css(), "50%");
    }

    #[test]
    fn page_is_monotonic_in_percent() {
        let mut last = 0;
        for step in 0..=1000 {
            let page = current_page(step as f64 / 10.0, LAYER_COUNT);
            assert!(page >= last, "page dropped from {last} to {page} at {step}");
            assert!((1..=15).contains(&page));
            last = page;
        }
        assert_eq!(last, 15);
    }

    #[test]
    fn page_boundaries() {
        // Each page spans 100/15 ≈ 6.67%.
        assert_eq!(current_page(0.0, 15), 1);
        assert_eq!(current_page(6.6, 15), 1);
        assert_eq!(current_page(6.7, 15), 2);
        assert_eq!(current_page(93.3, 15), 14);
        assert_eq!(current_page(93.4, 15), 15);
        assert_eq!(current_page(99.9, 15), 15);
        assert_eq!(current_page(100.0, 15), 15);
        assert_eq!(current_page(100.0 * 14.0 / 15.0, 15), 15);
    }

    #[test]
    fn saturates_at_fourteen_fifteenths_of_range() {
        let state = ProgressState::from_metrics(metrics(11200.0, 12800.0, 800.0));
        assert_eq!(state.page, 15);
        let state = ProgressState::from_metrics(metrics(11199.0, 12800.0, 800.0));
        assert_eq!(state.page, 14);
    }

    #[test]
    fn every_exact_boundary_starts_the_next_page() {
        for k in 1..15u32 {
            let offset = 12000.0 * f64::from(k) / 15.0;
            assert_eq!(page_at(offset, 12000.0, 15), k + 1, "boundary {k}/15");
            assert_eq!(page_at(offset - 1.0, 12000.0, 15), k, "just before {k}/15");
        }
    }

    #[test]
    fn page_at_edge_cases() {
        assert_eq!(page_at(0.0, 0.0, 15), 1);
        assert_eq!(page_at(-50.0, 12000.0, 15), 1);
        assert_eq!(page_at(13000.0, 12000.0, 15), 15);
        assert_eq!(page_at(f64::NAN, 12000.0, 15), 1);
        assert_eq!(page_at(f64::INFINITY, 12000.0, 15), 1);
    }

    #[test]
    fn zero_range_is_top() {
        let state = ProgressState::from_metrics(metrics(0.0, 800.0, 800.0));
        assert_eq!(state.percent, 0.0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn content_shorter_than_viewport_is_top() {
        let state = ProgressState::from_metrics(metrics(0.0, 400.0, 800.0));
        assert_eq!(state, ProgressState::initial());
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scroll_percent(-50.0, 1000.0), 0.0);
        assert_eq!(scroll_percent(1100.0, 1000.0), 100.0);
        assert_eq!(current_page(-10.0, 15), 1);
        assert_eq!(current_page(250.0, 15), 15);
    }

    #[test]
    fn non_finite_inputs_are_defined() {
        assert_eq!(scroll_percent(f64::NAN, 1000.0), 0.0);
        assert_eq!(scroll_percent(f64::INFINITY, 1000.0), 0.0);
        assert_eq!(current_page(f64::NAN, 15), 1);
    }

    #[test]
    fn serializes_for_js() {
        let json = serde_json::to_string(&ProgressState::initial()).unwrap();
        assert_eq!(json, r#"{"percent":0.0,"page":1}"#);
    }
}
