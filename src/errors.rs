//! Error taxonomy for document loading and rendering.

/// Faults raised by the render worker and surfaced in the UI.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to open document: {source}")]
    DocumentLoad {
        #[source]
        source: mupdf::error::Error,
    },

    #[error("failed to load page {page}: {source}")]
    PageLoad {
        page: u32,
        #[source]
        source: mupdf::error::Error,
    },

    #[error("failed to render page {page}: {source}")]
    Render {
        page: u32,
        #[source]
        source: mupdf::error::Error,
    },

    #[error("{detail}")]
    Surface { detail: String },
}

impl ViewerError {
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface { detail: msg.into() }
    }
}
