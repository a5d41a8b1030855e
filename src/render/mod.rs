//! Page rendering pipeline: one raster per request, fanned out into the
//! filter gallery by a background worker.

mod cache;
mod gallery;
mod request;
mod service;
mod state;
mod types;
mod worker;

pub use cache::{CacheKey, GalleryCache};
pub use gallery::{DESCRIPTION_MIN_SIZE, fan_out};
pub use request::{RenderParams, RenderRequest, RenderResponse, RequestId};
pub use service::{DocumentInfo, RenderService, ServiceEvent};
pub use state::{Command, Effect, ViewState};
pub use types::{FilteredSurface, ImageData, PageGallery};

/// Number of rendered galleries kept around for instant revisits.
pub const DEFAULT_CACHE_SIZE: usize = 8;
