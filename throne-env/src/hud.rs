//! Perception of the game HUD.
//!
//! A frame of the game window goes through the following stages:
//!
//! 1. capture by a [`ScreenCapture`] backend (a black frame if it fails),
//! 2. alpha removal and resizing to the observation resolution,
//! 3. extraction of each HUD panel, then of the health bar inside it,
//! 4. quantification of the bar with [`health::estimate`].
//!
//! The result is a [`HudFrame`]. Perception never fails: whatever goes wrong
//! degrades to zero health readings, and a reading of `0.0` cannot be told
//! apart from a panel that is not on the screen.
pub mod health;
mod layout;
mod region;
use crate::{backend::ScreenCapture, error::EnvError, tracker::Position};
use image::{
    imageops::{resize, FilterType::Triangle},
    Rgb, RgbImage, RgbaImage,
};
pub use layout::{HudLayout, HudPanelKind, PanelLayout, ScaledLayout};
use log::{debug, error, warn};
pub use region::{extract, Region};
use serde::{Deserialize, Serialize};

/// Message shown by the game when the character is blocked.
pub const CANNOT_MOVE: &str = "Cannot move";

/// Window size assumed when the capture backend cannot report it.
pub const FALLBACK_WINDOW_SIZE: (u32, u32) = (1920, 1080);

/// Spells cast since the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellUsage {
    /// Number of spells cast.
    pub spells_cast: u32,

    /// Number of those that hit something.
    pub effective_spells: u32,
}

/// Episode-level readings attached to a frame. Absent readings are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeInfo {
    /// Position of the player character.
    pub player_position: Option<Position>,

    /// Spell usage since the previous tick.
    pub spell_usage: Option<SpellUsage>,

    /// The goal of the episode was reached.
    pub goal_reached: bool,

    /// Number of steps taken in the episode so far.
    pub episode_length: Option<usize>,
}

/// Symbolic state read from one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudFrame {
    /// The resized screen.
    pub screen: RgbImage,

    /// Health of the player in `[0, 1]`.
    pub player_health: f32,

    /// Health of the target in `[0, 1]`.
    pub target_health: f32,

    /// Latest game message, if any.
    pub message: Option<String>,

    /// Episode-level readings.
    pub info: EpisodeInfo,
}

impl HudFrame {
    /// A black frame with zero health readings.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            screen: RgbImage::new(width, height),
            player_health: 0.0,
            target_health: 0.0,
            message: None,
            info: EpisodeInfo::default(),
        }
    }

    /// `true` if the game reported that the character cannot move.
    pub fn cannot_move(&self) -> bool {
        self.message.as_deref() == Some(CANNOT_MOVE)
    }
}

/// Turns captures of the game window into [`HudFrame`]s.
pub struct HudPerception {
    window_title: String,
    obs_size: (u32, u32),
    layout: ScaledLayout,
}

impl HudPerception {
    /// Creates the perception for a window, asking `capture` for its size.
    ///
    /// If the size is unavailable, `fallback` is assumed and a warning is logged.
    pub fn new<C: ScreenCapture>(
        capture: &mut C,
        window_title: impl Into<String>,
        obs_size: (u32, u32),
        layout: &HudLayout,
        fallback: (u32, u32),
    ) -> Self {
        let window_title = window_title.into();
        let window_size = match capture.window_size(&window_title) {
            Some((w, h)) if w > 0 && h > 0 => (w, h),
            _ => {
                warn!(
                    "Failed to retrieve the size of window '{}'. Using {}x{}.",
                    window_title, fallback.0, fallback.1
                );
                fallback
            }
        };
        Self::with_window_size(window_title, window_size, obs_size, layout)
    }

    /// Creates the perception for a window of known size `(width, height)`.
    pub fn with_window_size(
        window_title: impl Into<String>,
        window_size: (u32, u32),
        obs_size: (u32, u32),
        layout: &HudLayout,
    ) -> Self {
        Self {
            window_title: window_title.into(),
            obs_size,
            layout: ScaledLayout::new(layout, window_size, obs_size),
        }
    }

    /// Title of the captured window.
    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// `(width, height)` of observations.
    pub fn obs_size(&self) -> (u32, u32) {
        self.obs_size
    }

    /// The layout in observation coordinates.
    pub fn layout(&self) -> &ScaledLayout {
        &self.layout
    }

    /// Captures the window and reads the HUD.
    pub fn process<C: ScreenCapture>(&self, capture: &mut C) -> HudFrame {
        match self.try_process(capture) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Error processing HUD: {}", e);
                HudFrame::blank(self.obs_size.0, self.obs_size.1)
            }
        }
    }

    fn try_process<C: ScreenCapture>(&self, capture: &mut C) -> Result<HudFrame, EnvError> {
        let screen = self.screen_observation(capture)?;
        let player_health = self.read_health(&screen, HudPanelKind::Player);
        let target_health = self.read_health(&screen, HudPanelKind::Target);
        debug!(
            "Player Health: {:.2}, Target Health: {:.2}",
            player_health, target_health
        );

        let telemetry = capture.telemetry(&self.window_title);
        Ok(HudFrame {
            screen,
            player_health,
            target_health,
            message: telemetry.message,
            info: EpisodeInfo {
                player_position: telemetry.player_position,
                spell_usage: telemetry.spell_usage,
                goal_reached: telemetry.goal_reached,
                episode_length: None,
            },
        })
    }

    /// Captures the window and resizes it to the observation resolution.
    ///
    /// A failed capture yields a black screen.
    pub fn screen_observation<C: ScreenCapture>(
        &self,
        capture: &mut C,
    ) -> Result<RgbImage, EnvError> {
        match capture.capture(&self.window_title) {
            Some(frame) => self.preprocess(&frame),
            None => {
                error!("Failed to capture screen of '{}'.", self.window_title);
                Ok(RgbImage::new(self.obs_size.0, self.obs_size.1))
            }
        }
    }

    /// Drops the alpha channel and resizes a captured frame.
    pub fn preprocess(&self, frame: &RgbaImage) -> Result<RgbImage, EnvError> {
        let (w, h) = frame.dimensions();
        if w == 0 || h == 0 {
            return Err(EnvError::EmptyFrame(w, h));
        }

        let rgb = RgbImage::from_fn(w, h, |x, y| {
            let p = frame.get_pixel(x, y);
            Rgb([p[0], p[1], p[2]])
        });
        Ok(resize(&rgb, self.obs_size.0, self.obs_size.1, Triangle))
    }

    /// Reads the health bar of a panel from a resized screen.
    pub fn read_health(&self, screen: &RgbImage, kind: HudPanelKind) -> f32 {
        let layout = self.layout.panel(kind);
        let panel = match extract(screen, &layout.panel) {
            Some(panel) => panel,
            None => {
                debug!("{} is not visible", kind.name());
                return 0.0;
            }
        };
        let bar = extract(&panel, &layout.bar);
        health::estimate(bar.as_ref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        backend::Telemetry,
        util::test::{paint_hud, test_layout, ScriptedCapture, ScriptedCaptureConfig},
    };
    use anyhow::Result;

    const OBS: (u32, u32) = (160, 90);

    fn perception() -> HudPerception {
        HudPerception::with_window_size("test", OBS, OBS, &test_layout())
    }

    #[test]
    fn test_reads_both_health_bars() {
        let perception = perception();
        let screen = paint_hud(OBS, &test_layout(), 0.5, 0.8);
        let screen = perception.preprocess(&screen).unwrap();

        let player = perception.read_health(&screen, HudPanelKind::Player);
        let target = perception.read_health(&screen, HudPanelKind::Target);
        assert!((player - 0.5).abs() < 0.05, "player = {}", player);
        assert!((target - 0.8).abs() < 0.05, "target = {}", target);
    }

    #[test]
    fn test_panel_outside_of_screen_reads_zero() {
        let mut layout = test_layout();
        layout.target.panel = Region::new(500, 500, 10, 10);
        let perception = HudPerception::with_window_size("test", OBS, OBS, &layout);
        let screen = perception
            .preprocess(&paint_hud(OBS, &test_layout(), 1.0, 1.0))
            .unwrap();

        assert_eq!(perception.read_health(&screen, HudPanelKind::Target), 0.0);
        assert!(perception.read_health(&screen, HudPanelKind::Player) > 0.9);
    }

    #[test]
    fn test_failed_capture_gives_black_screen() -> Result<()> {
        let mut capture = ScriptedCapture::build(&ScriptedCaptureConfig::default())?;
        let frame = perception().process(&mut capture);

        assert_eq!(frame.screen.dimensions(), OBS);
        assert!(frame.screen.pixels().all(|p| p == &Rgb([0, 0, 0])));
        assert_eq!(frame.player_health, 0.0);
        assert_eq!(frame.target_health, 0.0);
        Ok(())
    }

    #[test]
    fn test_empty_frame_is_not_fatal() {
        let perception = perception();
        assert!(matches!(
            perception.preprocess(&RgbaImage::new(0, 10)),
            Err(EnvError::EmptyFrame(0, 10))
        ));
    }

    #[test]
    fn test_zero_sized_capture_gives_blank_frame() -> Result<()> {
        let config = ScriptedCaptureConfig::default()
            .window_size(Some((0, 0)))
            .push_frame(1.0, 1.0, Telemetry::default());
        let mut capture = ScriptedCapture::build(&config)?;
        let frame = perception().process(&mut capture);

        assert_eq!(capture.n_captures(), 1);
        assert_eq!(frame, HudFrame::blank(OBS.0, OBS.1));
        assert_eq!(frame.player_health, 0.0);
        assert!(frame.message.is_none());
        Ok(())
    }

    #[test]
    fn test_telemetry_is_attached() -> Result<()> {
        let telemetry = Telemetry {
            player_position: Some(Position::new(3, 4)),
            message: Some(CANNOT_MOVE.to_string()),
            spell_usage: None,
            goal_reached: true,
        };
        let config = ScriptedCaptureConfig::default()
            .window_size(Some(OBS))
            .push_frame(0.7, 0.0, telemetry);
        let mut capture = ScriptedCapture::build(&config)?;
        let frame = perception().process(&mut capture);

        assert!(frame.cannot_move());
        assert!(frame.info.goal_reached);
        assert_eq!(frame.info.player_position, Some(Position::new(3, 4)));
        assert_eq!(frame.info.episode_length, None);
        assert!((frame.player_health - 0.7).abs() < 0.05);
        assert_eq!(frame.target_health, 0.0);
        Ok(())
    }

    #[test]
    fn test_missing_window_size_falls_back() -> Result<()> {
        let mut capture = ScriptedCapture::build(&ScriptedCaptureConfig::default())?;
        let perception = HudPerception::new(
            &mut capture,
            "test",
            (160, 90),
            &HudLayout::default(),
            FALLBACK_WINDOW_SIZE,
        );
        let (sx, sy) = perception.layout().scale();
        assert!((sx - 160.0 / 1920.0).abs() < 1e-12);
        assert!((sy - 90.0 / 1080.0).abs() < 1e-12);
        Ok(())
    }
}
