//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Dimensions that fit `original` inside the `max` bounding box while keeping
/// the aspect ratio.
///
/// Images already inside the box keep their size: optimization never
/// upscales. Neither output edge drops below 1px.
///
/// ```
/// # use site_rebrand::imaging::fit_within;
/// assert_eq!(fit_within((1600, 1200), (800, 800)), (800, 600));
/// assert_eq!(fit_within((300, 200), (800, 800)), (300, 200));
/// ```
pub fn fit_within(original: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let (max_w, max_h) = max;

    if orig_w <= max_w && orig_h <= max_h {
        return original;
    }

    let scale = (max_w as f64 / orig_w as f64).min(max_h as f64 / orig_h as f64);
    let w = ((orig_w as f64 * scale).round() as u32).max(1);
    let h = ((orig_h as f64 * scale).round() as u32).max(1);
    (w.min(max_w), h.min(max_h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_limited_by_width() {
        assert_eq!(fit_within((1600, 1200), (800, 800)), (800, 600));
    }

    #[test]
    fn portrait_limited_by_height() {
        assert_eq!(fit_within((1000, 2000), (800, 800)), (400, 800));
    }

    #[test]
    fn square_fills_box() {
        assert_eq!(fit_within((2000, 2000), (800, 800)), (800, 800));
    }

    #[test]
    fn small_image_untouched() {
        assert_eq!(fit_within((120, 40), (800, 800)), (120, 40));
    }

    #[test]
    fn exact_fit_untouched() {
        assert_eq!(fit_within((800, 800), (800, 800)), (800, 800));
    }

    #[test]
    fn extreme_banner_keeps_one_pixel() {
        assert_eq!(fit_within((100_000, 10), (800, 800)), (800, 1));
    }

    #[test]
    fn non_square_box() {
        assert_eq!(fit_within((3000, 1000), (1200, 300)), (900, 300));
    }
}
