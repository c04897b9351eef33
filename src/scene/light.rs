use nalgebra_glm as glm;

use crate::math::deg_to_rad;

/// The orbiting scene light. The azimuth is a function of elapsed wall-clock
/// time rather than frame count, so the day/night cycle runs at the same
/// speed regardless of frame rate.
#[derive(Debug, Clone)]
pub struct LightState {
    /// Orbit angle in degrees.
    pub azimuth_deg: f32,
    /// Orbit radius.
    pub distance: f32,
    /// Intensities as percentages.
    pub ambient_pct: i32,
    pub diffuse_pct: i32,
    speed_dps: f32,
}

impl LightState {
    pub fn new(distance: f32, speed_dps: f32) -> Self {
        Self {
            azimuth_deg: 90.0,
            distance,
            ambient_pct: 10,
            diffuse_pct: 50,
            speed_dps,
        }
    }

    /// Reposition from elapsed seconds. Only called while lighting and spin
    /// are both enabled.
    pub fn advance(&mut self, elapsed_secs: f64) {
        self.azimuth_deg = ((self.speed_dps as f64 * elapsed_secs) % 360.0) as f32;
    }

    /// The light orbits in a vertical plane, so its height is what drives
    /// the day/night cycle.
    pub fn position(&self) -> glm::Vec3 {
        let a = deg_to_rad(self.azimuth_deg);
        glm::vec3(self.distance * a.cos(), self.distance * a.sin(), 0.0)
    }

    /// Day while the light sits above the ground plane.
    pub fn is_day(&self) -> bool {
        self.position().y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_night_follows_light_height() {
        let mut light = LightState::new(50.0, 90.0);
        light.azimuth_deg = 45.0; // sin > 0
        assert!(light.is_day());
        light.azimuth_deg = 200.0; // sin < 0
        assert!(!light.is_day());
        light.azimuth_deg = 0.0; // sin == 0, exactly on the horizon
        assert!(!light.is_day());
    }

    #[test]
    fn advance_wraps_at_a_full_orbit() {
        let mut light = LightState::new(50.0, 90.0);
        light.advance(1.0);
        assert!((light.azimuth_deg - 90.0).abs() < 1e-4);
        light.advance(5.0); // 450 degrees of travel
        assert!((light.azimuth_deg - 90.0).abs() < 1e-4);
    }

    #[test]
    fn position_stays_on_the_orbit_radius() {
        let mut light = LightState::new(50.0, 90.0);
        light.advance(0.37);
        let p = light.position();
        assert!((nalgebra_glm::length(&p) - 50.0).abs() < 1e-3);
        assert_eq!(p.z, 0.0);
    }
}
