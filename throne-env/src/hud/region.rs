//! Rectangular regions of a frame.
use image::{ImageBuffer, Pixel};
use log::trace;
use serde::{Deserialize, Serialize};

/// A rectangle in the pixel coordinates of a specific image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Top-left corner `(x, y)`.
    pub start: (u32, u32),

    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Creates a region.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            start: (x, y),
            width,
            height,
        }
    }

    /// Exclusive end coordinates `(x, y)`.
    pub fn end(&self) -> (u32, u32) {
        (
            self.start.0.saturating_add(self.width),
            self.start.1.saturating_add(self.height),
        )
    }

    /// Scales the region by per-axis factors.
    ///
    /// Coordinates are truncated to integers, dimensions are additionally
    /// bounded below by 1 so that a scaled region never degenerates.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Self {
        let scale = |v: u32, s: f64| (v as f64 * s) as u32;
        Self {
            start: (scale(self.start.0, scale_x), scale(self.start.1, scale_y)),
            width: scale(self.width, scale_x).max(1),
            height: scale(self.height, scale_y).max(1),
        }
    }
}

/// Crops `region` out of `image`.
///
/// The end coordinates are clamped to the image. `None` is returned when
/// nothing is left after clamping, which is how callers learn that a HUD
/// element is not visible.
pub fn extract<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    region: &Region,
) -> Option<ImageBuffer<P, Vec<P::Subpixel>>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let (start_x, start_y) = region.start;
    let (end_x, end_y) = region.end();
    let end_x = end_x.min(image.width());
    let end_y = end_y.min(image.height());

    if end_x <= start_x || end_y <= start_y {
        trace!(
            "Region {:?} is outside of the {}x{} image",
            region,
            image.width(),
            image.height()
        );
        return None;
    }

    Some(ImageBuffer::from_fn(
        end_x - start_x,
        end_y - start_y,
        |x, y| *image.get_pixel(start_x + x, start_y + y),
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn test_extract_inside() {
        let img = gradient(20, 10);
        let sub = extract(&img, &Region::new(5, 2, 4, 3)).unwrap();
        assert_eq!(sub.dimensions(), (4, 3));
        assert_eq!(sub.get_pixel(0, 0), &Rgb([5, 2, 0]));
        assert_eq!(sub.get_pixel(3, 2), &Rgb([8, 4, 0]));
    }

    #[test]
    fn test_extract_clamps_partial_overlap() {
        let img = gradient(20, 10);
        let sub = extract(&img, &Region::new(15, 8, 100, 100)).unwrap();
        assert_eq!(sub.dimensions(), (5, 2));
        assert_eq!(sub.get_pixel(4, 1), &Rgb([19, 9, 0]));
    }

    #[test]
    fn test_extract_outside_is_none() {
        let img = gradient(20, 10);
        assert!(extract(&img, &Region::new(20, 0, 5, 5)).is_none());
        assert!(extract(&img, &Region::new(0, 10, 5, 5)).is_none());
        assert!(extract(&img, &Region::new(u32::MAX, u32::MAX, u32::MAX, 1)).is_none());
        assert!(extract(&RgbImage::new(0, 0), &Region::new(0, 0, 1, 1)).is_none());
    }

    #[test]
    fn test_scaled_truncates_and_keeps_one_pixel() {
        let scale = 160.0 / 1920.0;
        let region = Region::new(28, 60, 309, 116).scaled(scale, 90.0 / 1080.0);
        assert_eq!(region, Region::new(2, 5, 25, 9));

        let tiny = Region::new(7, 7, 3, 3).scaled(scale, scale);
        assert_eq!(tiny, Region::new(0, 0, 1, 1));
    }
}
