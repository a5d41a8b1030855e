//! The color-vision-deficiency filter catalog.
//!
//! Each filter pairs display metadata with a 3x3 color matrix realizing the
//! simulation as a pure pixel transform. The matrices are the feColorMatrix
//! coefficients of the widely-used colourblind SVG filter set, so the
//! previews match what the same ids produce in a browser.

/// Row-major 3x3 matrix applied to linear-ish sRGB bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [[f32; 3]; 3]);

impl ColorMatrix {
    /// Transform a packed RGB buffer in place.
    pub fn apply(&self, rgb: &mut [u8]) {
        let m = &self.0;
        for px in rgb.chunks_exact_mut(3) {
            let r = f32::from(px[0]);
            let g = f32::from(px[1]);
            let b = f32::from(px[2]);
            px[0] = (m[0][0] * r + m[0][1] * g + m[0][2] * b).round().clamp(0.0, 255.0) as u8;
            px[1] = (m[1][0] * r + m[1][1] * g + m[1][2] * b).round().clamp(0.0, 255.0) as u8;
            px[2] = (m[2][0] * r + m[2][1] * g + m[2][2] * b).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Static metadata for one gallery entry.
#[derive(Debug)]
pub struct FilterDescriptor {
    /// Display name.
    pub name: &'static str,
    /// Explanatory caption shown when the render size allows it.
    pub description: &'static str,
    /// Catalog id, `None` for the unfiltered baseline.
    pub id: Option<&'static str>,
    /// Pixel transform, `None` for the unfiltered baseline.
    pub matrix: Option<ColorMatrix>,
}

/// The fixed, ordered filter catalog. The first entry is the unfiltered
/// baseline; the rest follow the red/green/blue/total deficiency groups.
pub const FILTERS: [FilterDescriptor; 9] = [
    FilterDescriptor {
        name: "No Filter",
        description: "Original image with no modifications.",
        id: None,
        matrix: None,
    },
    FilterDescriptor {
        name: "Protanopia",
        description: "Inability to perceive red light.",
        id: Some("protanopia"),
        matrix: Some(ColorMatrix([
            [0.567, 0.433, 0.0],
            [0.558, 0.442, 0.0],
            [0.0, 0.242, 0.758],
        ])),
    },
    FilterDescriptor {
        name: "Protanomaly",
        description: "Reduced sensitivity to red light.",
        id: Some("protanomaly"),
        matrix: Some(ColorMatrix([
            [0.817, 0.183, 0.0],
            [0.333, 0.667, 0.0],
            [0.0, 0.125, 0.875],
        ])),
    },
    FilterDescriptor {
        name: "Deuteranopia",
        description: "Inability to perceive green light.",
        id: Some("deuteranopia"),
        matrix: Some(ColorMatrix([
            [0.625, 0.375, 0.0],
            [0.7, 0.3, 0.0],
            [0.0, 0.3, 0.7],
        ])),
    },
    FilterDescriptor {
        name: "Deuteranomaly",
        description: "Reduced sensitivity to green light.",
        id: Some("deuteranomaly"),
        matrix: Some(ColorMatrix([
            [0.8, 0.2, 0.0],
            [0.258, 0.742, 0.0],
            [0.0, 0.142, 0.858],
        ])),
    },
    FilterDescriptor {
        name: "Tritanopia",
        description: "Inability to perceive blue light.",
        id: Some("tritanopia"),
        matrix: Some(ColorMatrix([
            [0.95, 0.05, 0.0],
            [0.0, 0.433, 0.567],
            [0.0, 0.475, 0.525],
        ])),
    },
    FilterDescriptor {
        name: "Tritanomaly",
        description: "Reduced sensitivity to blue light.",
        id: Some("tritanomaly"),
        matrix: Some(ColorMatrix([
            [0.967, 0.033, 0.0],
            [0.0, 0.733, 0.267],
            [0.0, 0.183, 0.817],
        ])),
    },
    FilterDescriptor {
        name: "Achromatopsia",
        description: "Inability to perceive any colors.",
        id: Some("achromatopsia"),
        matrix: Some(ColorMatrix([
            [0.299, 0.587, 0.114],
            [0.299, 0.587, 0.114],
            [0.299, 0.587, 0.114],
        ])),
    },
    FilterDescriptor {
        name: "Achromatomaly",
        description: "Reduced sensitivity to all colors.",
        id: Some("achromatomaly"),
        matrix: Some(ColorMatrix([
            [0.618, 0.320, 0.062],
            [0.163, 0.775, 0.062],
            [0.163, 0.320, 0.516],
        ])),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_entries_with_baseline_first() {
        assert_eq!(FILTERS.len(), 9);
        assert!(FILTERS[0].id.is_none());
        assert!(FILTERS[0].matrix.is_none());
        for filter in &FILTERS[1..] {
            assert!(filter.id.is_some());
            assert!(filter.matrix.is_some());
        }
    }

    #[test]
    fn catalog_ids_match_external_filter_names() {
        let ids: Vec<_> = FILTERS.iter().filter_map(|f| f.id).collect();
        assert_eq!(
            ids,
            [
                "protanopia",
                "protanomaly",
                "deuteranopia",
                "deuteranomaly",
                "tritanopia",
                "tritanomaly",
                "achromatopsia",
                "achromatomaly",
            ]
        );
    }

    #[test]
    fn achromatopsia_produces_grayscale() {
        let matrix = FILTERS[7].matrix.as_ref().unwrap();
        let mut px = [200u8, 40, 90];
        matrix.apply(&mut px);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn matrix_apply_clamps_to_byte_range() {
        // Rows summing above 1.0 must not wrap around.
        let matrix = ColorMatrix([[1.2, 0.3, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let mut px = [255u8, 255, 255];
        matrix.apply(&mut px);
        assert_eq!(px, [255, 255, 255]);
    }

    #[test]
    fn protanopia_flattens_pure_red() {
        let matrix = FILTERS[1].matrix.as_ref().unwrap();
        let mut px = [255u8, 0, 0];
        matrix.apply(&mut px);
        // Red collapses toward a dull yellow-brown: red and green channels
        // converge, blue stays near zero.
        assert!(px[0] > 100 && px[1] > 100);
        assert_eq!(px[2], 0);
    }
}
