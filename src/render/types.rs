//! Core types for the rendered gallery.

/// Raw rendered raster.
///
/// Tightly packed RGB pixel data (3 bytes per pixel). This is the
/// intermediate format between MuPDF rendering and terminal presentation.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGB pixel data (R, G, B per pixel, no padding)
    pub pixels: Vec<u8>,
    /// Image width in pixels
    pub width_px: u32,
    /// Image height in pixels
    pub height_px: u32,
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("width_px", &self.width_px)
            .field("height_px", &self.height_px)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// One gallery tile: a filtered copy of the page raster plus its labels.
#[derive(Clone, Debug)]
pub struct FilteredSurface {
    /// Filter display name
    pub name: &'static str,
    /// Description caption, present only when the render size is legible
    pub caption: Option<&'static str>,
    /// Filtered raster, same dimensions as the base raster
    pub image: ImageData,
}

/// Complete rendered gallery for one page.
#[derive(Clone)]
pub struct PageGallery {
    /// Page number (1-indexed, as displayed)
    pub page_number: u32,
    /// Effective render size in pixels after the per-page clamp
    pub target_size: u32,
    /// Scale factor used for rendering
    pub scale: f32,
    /// Natural page width in document units
    pub natural_width: f32,
    /// Natural page height in document units
    pub natural_height: f32,
    /// The nine filtered surfaces, in catalog order
    pub surfaces: Vec<FilteredSurface>,
}

impl std::fmt::Debug for PageGallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageGallery")
            .field("page_number", &self.page_number)
            .field("target_size", &self.target_size)
            .field("scale", &self.scale)
            .field("natural_width", &self.natural_width)
            .field("natural_height", &self.natural_height)
            .field("surfaces", &self.surfaces.len())
            .finish_non_exhaustive()
    }
}
