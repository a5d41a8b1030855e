//! Half-block raster widget.
//!
//! Draws an RGB raster with U+2580 upper-half-block cells: each terminal
//! cell carries two vertically stacked pixels (foreground = top, background
//! = bottom). Half-block "pixels" are roughly square on common fonts, so no
//! aspect correction is applied beyond the 2:1 vertical packing. Rasters
//! larger than the target area are box-filtered down; smaller ones are
//! drawn at native size, never upscaled.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::render::ImageData;

const UPPER_HALF_BLOCK: &str = "\u{2580}";

pub struct Halfblocks<'a> {
    image: &'a ImageData,
}

impl<'a> Halfblocks<'a> {
    #[must_use]
    pub fn new(image: &'a ImageData) -> Self {
        Self { image }
    }

    /// Rows of terminal cells needed to show `image` at `width_cells`
    /// columns. Used by layout code to size gallery tiles.
    #[must_use]
    pub fn rows_for_width(image: &ImageData, width_cells: u16) -> u16 {
        if image.width_px == 0 || image.height_px == 0 || width_cells == 0 {
            return 0;
        }
        let scale = (f64::from(width_cells) / f64::from(image.width_px)).min(1.0);
        let out_h = (f64::from(image.height_px) * scale).ceil().max(1.0) as u32;
        out_h.div_ceil(2).min(u32::from(u16::MAX)) as u16
    }

    fn output_size(&self, area: Rect) -> (u32, u32) {
        let avail_w = u32::from(area.width);
        let avail_h = u32::from(area.height) * 2;
        let scale = (f64::from(avail_w) / f64::from(self.image.width_px))
            .min(f64::from(avail_h) / f64::from(self.image.height_px))
            .min(1.0);
        let out_w = ((f64::from(self.image.width_px) * scale) as u32).max(1);
        let out_h = ((f64::from(self.image.height_px) * scale) as u32).max(1);
        (out_w.min(avail_w), out_h.min(avail_h))
    }

    /// Average the source pixels mapped onto output pixel (ox, oy).
    fn sample(&self, ox: u32, oy: u32, out_w: u32, out_h: u32) -> (u8, u8, u8) {
        let img = self.image;
        let x0 = (u64::from(ox) * u64::from(img.width_px) / u64::from(out_w)) as u32;
        let mut x1 = ((u64::from(ox) + 1) * u64::from(img.width_px) / u64::from(out_w)) as u32;
        let y0 = (u64::from(oy) * u64::from(img.height_px) / u64::from(out_h)) as u32;
        let mut y1 = ((u64::from(oy) + 1) * u64::from(img.height_px) / u64::from(out_h)) as u32;
        x1 = x1.max(x0 + 1).min(img.width_px);
        y1 = y1.max(y0 + 1).min(img.height_px);

        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for y in y0..y1 {
            let row = (y * img.width_px) as usize * 3;
            for x in x0..x1 {
                let i = row + x as usize * 3;
                r += u64::from(img.pixels[i]);
                g += u64::from(img.pixels[i + 1]);
                b += u64::from(img.pixels[i + 2]);
            }
        }
        let count = u64::from(x1 - x0) * u64::from(y1 - y0);
        ((r / count) as u8, (g / count) as u8, (b / count) as u8)
    }
}

impl Widget for Halfblocks<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0
            || area.height == 0
            || self.image.width_px == 0
            || self.image.height_px == 0
        {
            return;
        }

        let (out_w, out_h) = self.output_size(area);
        let rows = out_h.div_ceil(2).min(u32::from(area.height));

        for cy in 0..rows {
            let y = area.y + cy as u16;
            for cx in 0..out_w.min(u32::from(area.width)) {
                let x = area.x + cx as u16;
                let (tr, tg, tb) = self.sample(cx, cy * 2, out_w, out_h);
                let cell = &mut buf[(x, y)];
                cell.set_symbol(UPPER_HALF_BLOCK);
                cell.set_fg(Color::Rgb(tr, tg, tb));
                if cy * 2 + 1 < out_h {
                    let (br, bg, bb) = self.sample(cx, cy * 2 + 1, out_w, out_h);
                    cell.set_bg(Color::Rgb(br, bg, bb));
                }
            }
        }
    }
}
