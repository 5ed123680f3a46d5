//! Health-bar quantification.
use image::{imageops::grayscale, RgbImage};
use log::debug;

/// Luma above which a pixel counts as part of the filled bar.
pub const FILL_THRESHOLD: u8 = 128;

/// Estimates the filled fraction of a health bar.
///
/// The bar is converted to luma and binarized at [`FILL_THRESHOLD`]; the
/// result is the ratio of bright pixels to all pixels, hence always in `[0, 1]`.
/// A missing or empty bar reads as `0.0`, the same value as an empty bar.
pub fn estimate(bar: Option<&RgbImage>) -> f32 {
    let bar = match bar {
        Some(bar) if bar.width() > 0 && bar.height() > 0 => bar,
        _ => {
            debug!("Health bar image not found. Setting health to 0.0");
            return 0.0;
        }
    };

    let luma = grayscale(bar);
    let total = luma.width() as usize * luma.height() as usize;
    let filled = luma.pixels().filter(|p| p[0] > FILL_THRESHOLD).count();

    filled as f32 / total as f32
}
