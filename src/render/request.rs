//! Render request and response types.

use std::sync::Arc;

use crate::errors::ViewerError;
use crate::scale::SizeControl;

use super::types::PageGallery;

/// Monotonic generation counter for render requests. The service only
/// accepts responses carrying the newest id; anything older is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Parameters for rendering one page gallery.
#[derive(Clone, Copy, Debug)]
pub struct RenderParams {
    /// The size control at request time. The worker narrows a copy of it
    /// against the page's natural bounds before rasterizing, so a raster at
    /// an unclamped size is never produced.
    pub size: SizeControl,
}

/// Request sent to the render worker.
#[derive(Debug)]
pub enum RenderRequest {
    /// Render the gallery for a page (1-indexed)
    Gallery {
        id: RequestId,
        page: u32,
        params: RenderParams,
    },

    /// Shutdown the worker
    Shutdown,
}

/// Response from the render worker.
#[derive(Debug)]
pub enum RenderResponse {
    /// Rendered gallery for a page
    Gallery {
        id: RequestId,
        page: u32,
        data: Arc<PageGallery>,
    },

    /// Error while loading or rendering a page
    Error { id: RequestId, error: ViewerError },

    /// Document metadata, sent once after the document opens
    DocumentInfo {
        page_count: u32,
        title: Option<String>,
    },

    /// The document itself could not be opened
    DocumentFailed { error: ViewerError },
}
