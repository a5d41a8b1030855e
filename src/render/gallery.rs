//! Fan-out of one base raster into the nine filtered surfaces.

use rayon::prelude::*;

use crate::filters::FILTERS;

use super::types::{FilteredSurface, ImageData};

/// Minimum render size in pixels at which filter descriptions are legible
/// enough to show as captions.
pub const DESCRIPTION_MIN_SIZE: u32 = 200;

/// Produce the nine gallery surfaces from a single rendered raster.
///
/// Surfaces come back in catalog order and share the base dimensions; the
/// baseline surface is a byte-identical copy. Filters run in parallel over
/// independent buffers.
#[must_use]
pub fn fan_out(base: &ImageData, target_size: u32) -> Vec<FilteredSurface> {
    let with_captions = target_size >= DESCRIPTION_MIN_SIZE;

    FILTERS
        .par_iter()
        .map(|filter| {
            let mut pixels = base.pixels.clone();
            if let Some(matrix) = &filter.matrix {
                matrix.apply(&mut pixels);
            }
            FilteredSurface {
                name: filter.name,
                caption: with_captions.then_some(filter.description),
                image: ImageData {
                    pixels,
                    width_px: base.width_px,
                    height_px: base.height_px,
                },
            }
        })
        .collect()
}
