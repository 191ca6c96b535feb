use serde::{Deserialize, Serialize};

use crate::snap::SnapSettings;

/// All manipulation tuning in one place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Hit-test radius in screen pixels (converted to world units per point)
    pub hit_area_px: f32,
    /// Constrained-drag sensitivity in world units per pixel
    pub move_sensitivity: f32,
    pub snap: SnapSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            hit_area_px: 24.0,
            move_sensitivity: 0.01,
            snap: SnapSettings::default(),
        }
    }
}
