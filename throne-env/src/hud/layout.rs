//! Placement of the HUD widgets on the game window.
use super::Region;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// The HUD panels that carry a health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudPanelKind {
    /// Status of the player character.
    Player,

    /// Status of the currently selected target.
    Target,
}

impl HudPanelKind {
    /// Key of the panel, as used in logs and records.
    pub fn name(&self) -> &'static str {
        match self {
            HudPanelKind::Player => "player_hud",
            HudPanelKind::Target => "target_hud",
        }
    }
}

/// A HUD panel and the health bar inside of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// The panel in window coordinates.
    pub panel: Region,

    /// The health bar, relative to the origin of [`PanelLayout::panel`].
    pub bar: Region,
}

/// Reference placement of the HUD in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudLayout {
    /// Player panel.
    pub player: PanelLayout,

    /// Target panel.
    pub target: PanelLayout,
}

impl Default for HudLayout {
    /// Layout of the game client at 1920x1080.
    fn default() -> Self {
        Self {
            player: PanelLayout {
                panel: Region::new(28, 60, 309, 116),
                bar: Region::new(109 - 28, 96 - 60, 207, 18),
            },
            target: PanelLayout {
                panel: Region::new(339, 59, 232, 119),
                bar: Region::new(371 - 339, 92 - 59, 161, 20),
            },
        }
    }
}

impl HudLayout {
    /// Returns the layout of a panel.
    pub fn panel(&self, kind: HudPanelKind) -> &PanelLayout {
        match kind {
            HudPanelKind::Player => &self.player,
            HudPanelKind::Target => &self.target,
        }
    }
}

/// [`HudLayout`] scaled from the window resolution to the observation resolution.
///
/// Panels and bars are scaled independently with the same factors, bars staying
/// relative to the scaled origin of their panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledLayout {
    player: PanelLayout,
    target: PanelLayout,
    scale: (f64, f64),
}

impl ScaledLayout {
    /// Scales `layout`, given `(width, height)` of the window and of the observation.
    pub fn new(layout: &HudLayout, original: (u32, u32), resized: (u32, u32)) -> Self {
        let scale_x = resized.0 as f64 / original.0 as f64;
        let scale_y = resized.1 as f64 / original.1 as f64;
        info!("Scaling factors - X: {:.4}, Y: {:.4}", scale_x, scale_y);

        let scale_panel = |kind: HudPanelKind| {
            let p = layout.panel(kind);
            let scaled = PanelLayout {
                panel: p.panel.scaled(scale_x, scale_y),
                bar: p.bar.scaled(scale_x, scale_y),
            };
            debug!(
                "Scaled {}: panel = {:?}, bar = {:?}",
                kind.name(),
                scaled.panel,
                scaled.bar
            );
            scaled
        };

        Self {
            player: scale_panel(HudPanelKind::Player),
            target: scale_panel(HudPanelKind::Target),
            scale: (scale_x, scale_y),
        }
    }

    /// Returns the scaled layout of a panel.
    pub fn panel(&self, kind: HudPanelKind) -> &PanelLayout {
        match kind {
            HudPanelKind::Player => &self.player,
            HudPanelKind::Target => &self.target,
        }
    }

    /// Per-axis scale factors `(x, y)`.
    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }
}
