//! Scroll Reveal core: fades the layers of an SVG illustration in as the
//! reader scrolls through a dedicated container.
//!
//! Everything here is host-independent: the browser DOM and the in-memory
//! test host both sit behind the [`page::Page`] trait.

pub mod config;
pub mod error;
pub mod layer;
pub mod lint;
pub mod loader;
pub mod markup;
pub mod memory;
pub mod page;
pub mod progress;
pub mod reveal;
pub mod scroll;
pub mod session;

pub use config::RevealConfig;
pub use error::RevealError;
pub use layer::{LAYER_COUNT, LAYER_NAMES, LayerTable};
pub use lint::{LintDiagnostic, LintSeverity, lint_markup};
pub use loader::FetchedResource;
pub use memory::MemoryPage;
pub use page::{Page, PageLabel, ScrollMetrics};
pub use progress::ProgressState;
pub use session::Session;
