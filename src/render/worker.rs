//! Render worker - owns the MuPDF document in a dedicated thread.

use std::path::Path;
use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, warn};
use mupdf::{Colorspace, Document, Matrix, Pixmap};

use crate::errors::ViewerError;
use crate::scale::compute_scale;

use super::gallery::fan_out;
use super::request::{RenderParams, RenderRequest, RenderResponse};
use super::types::{ImageData, PageGallery};

/// Main worker loop - runs in a dedicated thread. Opens the document,
/// reports its metadata, then serves gallery requests until shutdown.
pub fn render_worker(
    doc_path: &Path,
    requests: Receiver<RenderRequest>,
    responses: Sender<RenderResponse>,
) {
    let doc = match Document::open(doc_path.to_string_lossy().as_ref()) {
        Ok(d) => d,
        Err(e) => {
            warn!("failed to open {}: {e}", doc_path.display());
            let _ = responses.send(RenderResponse::DocumentFailed {
                error: ViewerError::DocumentLoad { source: e },
            });
            return;
        }
    };

    match doc.page_count() {
        Ok(count) if count > 0 => {
            let title = doc
                .metadata(mupdf::MetadataName::Title)
                .ok()
                .filter(|t| !t.is_empty());
            let _ = responses.send(RenderResponse::DocumentInfo {
                page_count: count as u32,
                title,
            });
        }
        Ok(_) => {
            let _ = responses.send(RenderResponse::DocumentFailed {
                error: ViewerError::surface("document has no pages"),
            });
            return;
        }
        Err(e) => {
            let _ = responses.send(RenderResponse::DocumentFailed {
                error: ViewerError::DocumentLoad { source: e },
            });
            return;
        }
    }

    for request in requests {
        match request {
            RenderRequest::Gallery { id, page, params } => {
                debug!("rendering page {page} at target size {}", params.size.value);
                match render_gallery(&doc, page, &params) {
                    Ok(data) => {
                        let _ = responses.send(RenderResponse::Gallery {
                            id,
                            page,
                            data: Arc::new(data),
                        });
                    }
                    Err(error) => {
                        let _ = responses.send(RenderResponse::Error { id, error });
                    }
                }
            }

            RenderRequest::Shutdown => break,
        }
    }
}

/// Render the filter gallery for one page.
///
/// The page is rasterized exactly once; all nine surfaces are pixel
/// transforms of that single raster.
pub fn render_gallery(
    doc: &Document,
    page_number: u32,
    params: &RenderParams,
) -> Result<PageGallery, ViewerError> {
    let page = doc
        .load_page(page_number as i32 - 1)
        .map_err(|source| ViewerError::PageLoad {
            page: page_number,
            source,
        })?;

    let bounds = page.bounds().map_err(|source| ViewerError::PageLoad {
        page: page_number,
        source,
    })?;
    let natural_width = bounds.x1 - bounds.x0;
    let natural_height = bounds.y1 - bounds.y0;
    if natural_width <= 0.0 || natural_height <= 0.0 {
        return Err(ViewerError::surface(format!(
            "page {page_number} has an empty bounding box"
        )));
    }

    // Clamp the requested size to this page's natural bounds before any
    // rasterization, exactly as the size control itself will be narrowed
    // once the gallery arrives.
    let mut size = params.size;
    size.narrow_max(natural_width, natural_height);
    let target_size = size.value;

    let scale = compute_scale(natural_width, natural_height, target_size as f32);
    let transform = Matrix::new_scale(scale, scale);
    let rgb = Colorspace::device_rgb();
    let pixmap = page
        .to_pixmap(&transform, &rgb, false, false)
        .map_err(|source| ViewerError::Render {
            page: page_number,
            source,
        })?;

    let base = ImageData {
        pixels: pixmap_to_rgb(&pixmap)?,
        width_px: pixmap.width(),
        height_px: pixmap.height(),
    };

    let surfaces = fan_out(&base, target_size);

    Ok(PageGallery {
        page_number,
        target_size,
        scale,
        natural_width,
        natural_height,
        surfaces,
    })
}

fn pixmap_to_rgb(pixmap: &Pixmap) -> Result<Vec<u8>, ViewerError> {
    let n = pixmap.n() as usize;
    if n < 3 {
        return Err(ViewerError::surface(format!(
            "unsupported pixmap format: {n} channels"
        )));
    }

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let stride = pixmap.stride() as usize;
    let samples = pixmap.samples();
    let row_bytes = width * n;
    if samples.len() < stride.saturating_mul(height) || row_bytes > stride {
        return Err(ViewerError::surface("pixmap buffer size mismatch"));
    }

    let mut out = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let row = &samples[y * stride..y * stride + row_bytes];
        if n == 3 {
            out.extend_from_slice(row);
        } else {
            for px in row.chunks_exact(n) {
                out.extend_from_slice(&px[..3]);
            }
        }
    }

    Ok(out)
}
