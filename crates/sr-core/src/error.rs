/// Failures that abort initialization.
///
/// Missing individual layers are not errors; they are logged and skipped
/// by [`crate::layer::prepare_layers`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RevealError {
    /// The SVG could not be fetched, or the server answered with a non-2xx status.
    #[error("{}", load_message(.status, .message))]
    Load { status: Option<u16>, message: String },

    /// The fetched markup has no `<svg>` root element.
    #[error("SVG structure error: {0}")]
    Structure(String),

    /// The host page lacks an element the effect needs.
    #[error("page element not found: {0}")]
    MissingElement(String),

    /// The browser rejected an operation (no window, listener refused).
    #[error("host error: {0}")]
    Host(String),

    /// The configuration JSON could not be read.
    #[error("config error: {0}")]
    Config(String),
}

impl RevealError {
    /// HTTP status carried by a load failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RevealError::Load { status, .. } => *status,
            _ => None,
        }
    }
}

fn load_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("SVG load failed: {code} {message}"),
        None => format!("SVG load failed: {message}"),
    }
}
