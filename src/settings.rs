use serde::{Deserialize, Serialize};

pub const CONFY_APP_NAME: &str = "rovervis-rs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub fov_deg: f32,
    pub show_axes: bool,
    pub sky_day_color: [f32; 3],
    pub sky_night_color: [f32; 3],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fov_deg: 55.0,
            show_axes: true,
            sky_day_color: [0.35, 0.55, 0.75],
            sky_night_color: [0.01, 0.01, 0.04],
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "display", self);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSettings {
    /// Degrees per second of light orbit while spinning.
    pub light_speed_dps: f32,
    /// Fixed seed for the obstacle respawn position. `None` seeds from the
    /// OS.
    pub obstacle_seed: Option<u64>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            light_speed_dps: 90.0,
            obstacle_seed: None,
        }
    }
}

impl SimSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "simulation").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "simulation", self);
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub display: DisplaySettings,
    pub sim: SimSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            display: DisplaySettings::load(),
            sim: SimSettings::load(),
        }
    }
}
