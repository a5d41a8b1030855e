//! Render scale computation and the user's page size control.
//!
//! The size control mirrors a range slider: a value in pixels for the
//! largest page dimension, bounded and stepped. Its upper bound is narrowed
//! per page so the user can never request more pixels than the page has.

/// Smallest selectable page size in pixels.
pub const DEFAULT_MIN_SIZE: u32 = 100;
/// Initial page size in pixels.
pub const DEFAULT_SIZE: u32 = 350;
/// Largest selectable page size in pixels.
pub const DEFAULT_MAX_SIZE: u32 = 2000;
/// Increment of the size control.
pub const DEFAULT_SIZE_STEP: u32 = 50;

/// Scale that maps page coordinates 1:1 to pixels.
const NATIVE_SCALE: f32 = 1.0;

/// Compute the render scale for a page of the given natural dimensions so
/// that it fits a `target_size` x `target_size` box without distortion.
///
/// The smaller per-axis ratio governs, and the result never exceeds 1.0:
/// pages are never upscaled past their intrinsic resolution.
#[must_use]
pub fn compute_scale(natural_width: f32, natural_height: f32, target_size: f32) -> f32 {
    let x_scale = target_size / natural_width;
    let y_scale = target_size / natural_height;
    NATIVE_SCALE.min(x_scale).min(y_scale)
}

/// Lower `current_max` to the largest multiple of `step` not exceeding the
/// page's natural maximum dimension. A page larger than `current_max` leaves
/// the bound unchanged; the bound is never raised.
#[must_use]
pub fn clamp_size_bound(
    natural_width: f32,
    natural_height: f32,
    current_max: u32,
    step: u32,
) -> u32 {
    let natural_max = natural_width.max(natural_height);
    if natural_max < current_max as f32 {
        let floored = natural_max as u32;
        floored - floored % step.max(1)
    } else {
        current_max
    }
}

/// The user's desired largest page dimension, with slider-like bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeControl {
    pub value: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for SizeControl {
    fn default() -> Self {
        Self {
            value: DEFAULT_SIZE,
            min: DEFAULT_MIN_SIZE,
            max: DEFAULT_MAX_SIZE,
            step: DEFAULT_SIZE_STEP,
        }
    }
}

impl SizeControl {
    /// Set the value directly, clamped to the current bounds.
    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Increase by one step. Returns true if the value changed.
    pub fn step_up(&mut self) -> bool {
        let next = (self.value + self.step).min(self.max);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    /// Decrease by one step. Returns true if the value changed.
    pub fn step_down(&mut self) -> bool {
        let next = self.value.saturating_sub(self.step).max(self.min);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    /// Narrow the upper bound to the page's natural maximum dimension,
    /// keeping it a step multiple and never below `min`. Pulls the current
    /// value down if the new bound undercuts it. Returns true if the value
    /// changed (which requires a re-render).
    pub fn narrow_max(&mut self, natural_width: f32, natural_height: f32) -> bool {
        let new_max = clamp_size_bound(natural_width, natural_height, self.max, self.step);
        self.max = new_max.max(self.min);
        if self.value > self.max {
            self.value = self.max;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_fits_letter_page_to_target() {
        let scale = compute_scale(612.0, 792.0, 350.0);
        assert!((scale - 350.0 / 792.0).abs() < 1e-6);
    }

    #[test]
    fn scale_never_upscales_past_native_resolution() {
        assert_eq!(compute_scale(100.0, 100.0, 2000.0), 1.0);
    }

    #[test]
    fn scaled_longest_dimension_fits_target() {
        for (w, h, target) in [(612.0, 792.0, 350.0), (1024.0, 300.0, 500.0), (50.0, 80.0, 40.0)] {
            let scale = compute_scale(w, h, target);
            assert!(scale <= 1.0);
            assert!(scale * w.max(h) <= target + 1e-3);
        }
    }

    #[test]
    fn bound_lowers_to_step_multiple_of_natural_max() {
        assert_eq!(clamp_size_bound(400.0, 300.0, 2000, 50), 400);
        assert_eq!(clamp_size_bound(333.0, 200.0, 2000, 50), 300);
    }

    #[test]
    fn bound_unchanged_when_page_is_large_enough() {
        assert_eq!(clamp_size_bound(3000.0, 2400.0, 2000, 50), 2000);
        assert_eq!(clamp_size_bound(2000.0, 100.0, 2000, 50), 2000);
    }

    #[test]
    fn size_control_steps_within_bounds() {
        let mut size = SizeControl::default();
        assert_eq!(size.value, 350);
        assert!(size.step_up());
        assert_eq!(size.value, 400);
        assert!(size.step_down());
        assert!(size.step_down());
        assert_eq!(size.value, 300);

        size.set(DEFAULT_MAX_SIZE);
        assert!(!size.step_up());
        assert_eq!(size.value, DEFAULT_MAX_SIZE);

        size.set(DEFAULT_MIN_SIZE);
        assert!(!size.step_down());
        assert_eq!(size.value, DEFAULT_MIN_SIZE);
    }

    #[test]
    fn narrow_max_pulls_value_down() {
        let mut size = SizeControl::default();
        size.set(1000);
        let changed = size.narrow_max(400.0, 300.0);
        assert!(changed);
        assert_eq!(size.max, 400);
        assert_eq!(size.value, 400);

        // A later, larger page never raises the bound back.
        let changed = size.narrow_max(5000.0, 5000.0);
        assert!(!changed);
        assert_eq!(size.max, 400);
    }

    #[test]
    fn narrow_max_never_drops_below_min() {
        let mut size = SizeControl::default();
        size.narrow_max(80.0, 60.0);
        assert_eq!(size.max, DEFAULT_MIN_SIZE);
        assert_eq!(size.value, DEFAULT_MIN_SIZE);
    }
}
