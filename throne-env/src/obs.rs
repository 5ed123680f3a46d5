//! Observation of [`ThroneEnv`](crate::ThroneEnv).
use image::RgbImage;
use throne_core::Obs;

/// Default observation height in pixels.
pub const DEFAULT_OBS_HEIGHT: usize = 90;

/// Default observation width in pixels.
pub const DEFAULT_OBS_WIDTH: usize = 160;

/// A resized screen in height × width × 3 layout, one byte per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ThroneObs {
    frame: Vec<u8>,
    height: usize,
    width: usize,
}

impl ThroneObs {
    /// An all-black observation.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            frame: vec![0; height * width * 3],
            height,
            width,
        }
    }

    /// `[height, width, 3]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.height, self.width, 3]
    }

    /// Raw bytes, row-major.
    pub fn as_slice(&self) -> &[u8] {
        &self.frame
    }

    /// Pixel intensities scaled into `[0, 1]`, the usual input of a policy network.
    pub fn to_normalized(&self) -> Vec<f32> {
        self.frame.iter().map(|&v| v as f32 / 255.0).collect()
    }
}

impl From<RgbImage> for ThroneObs {
    fn from(img: RgbImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        Self {
            frame: img.into_raw(),
            height,
            width,
        }
    }
}

impl Obs for ThroneObs {
    fn dummy(_n: usize) -> Self {
        Self::zeros(DEFAULT_OBS_HEIGHT, DEFAULT_OBS_WIDTH)
    }

    fn len(&self) -> usize {
        1
    }
}
