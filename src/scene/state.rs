use std::time::Instant;

use crate::render::frame::FrameGeometry;
use crate::rover::Rover;
use crate::scene::environment;
use crate::scene::light::LightState;
use crate::scene::obstacle::Obstacle;
use crate::scene::view::{NavKey, ViewState};
use crate::settings::Settings;
use crate::texture::manager::SceneTextures;

const GROUND_SCROLL_STEP: f32 = 0.002;

/// Outcome of a key press: whether the projection must be recomputed and the
/// scene redrawn, and whether an exit was requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyResponse {
    pub redraw: bool,
    pub exit: bool,
}

/// The whole-scene simulation state, owned by one aggregate so update logic
/// is testable without a graphics context.
pub struct SceneState {
    /// Size of the world.
    pub dim: f32,
    pub fov_deg: f32,
    pub view: ViewState,
    pub light: LightState,
    pub obstacle: Obstacle,
    pub ground_scroll: f32,
    pub rover: Rover,
    started: Instant,
}

impl SceneState {
    pub fn new(settings: &Settings) -> Self {
        let dim = 150.0;
        Self {
            dim,
            fov_deg: settings.display.fov_deg,
            view: ViewState::new(settings.display.show_axes),
            light: LightState::new(dim / 3.0, settings.sim.light_speed_dps),
            obstacle: Obstacle::new(settings.sim.obstacle_seed),
            ground_scroll: 0.0,
            rover: Rover::default(),
            started: Instant::now(),
        }
    }

    /// Night while the orbiting light sits at or below the ground plane.
    pub fn is_night(&self) -> bool {
        !self.light.is_day()
    }

    /// One idle tick: the light follows wall-clock time while lighting and
    /// spin are enabled; ground scroll and the obstacle advance
    /// unconditionally.
    pub fn idle(&mut self) {
        if self.view.lighting && self.view.spin {
            let t = self.started.elapsed().as_secs_f64();
            self.light.advance(t);
        }
        self.ground_scroll += GROUND_SCROLL_STEP;
        self.obstacle.tick();
    }

    /// Emit the full frame: environment first, then the rover.
    pub fn emit(&self, frame: &mut FrameGeometry, textures: &SceneTextures) {
        environment::ground(frame, textures, self.dim, self.ground_scroll);
        environment::mountains(frame, self.dim);
        environment::rock(frame, &self.obstacle);
        if self.view.show_axes {
            environment::axes(frame, self.dim);
        }
        if self.view.lighting {
            // Marker ball at the orbiting light's position
            frame.ball([1.0, 1.0, 1.0], &self.light.position(), 5.0, 10);
        }
        self.rover.emit(frame, textures, self.is_night());
    }

    /// ASCII key handler. Exit on ESC; every handled key requests a redraw.
    pub fn key(&mut self, ch: char) -> KeyResponse {
        let mut response = KeyResponse {
            redraw: true,
            exit: false,
        };
        match ch.to_ascii_lowercase() {
            '\u{1b}' => {
                response.exit = true;
                response.redraw = false;
            }
            'r' => self.view.reset_angles(),
            'a' => self.view.toggle_axes(),
            'm' => self.view.toggle_view_mode(),
            'l' => self.view.toggle_light(),
            'k' => self.view.toggle_light_spin(),
            't' => self.view.toggle_texture_mode(),
            'w' if self.view.mode == crate::scene::view::ViewMode::FirstPerson => {
                self.view.elevate(1.0)
            }
            's' if self.view.mode == crate::scene::view::ViewMode::FirstPerson => {
                self.view.elevate(-1.0)
            }
            _ => response.redraw = false,
        }
        response
    }

    /// Navigation (arrow) key handler.
    pub fn special(&mut self, key: NavKey) -> KeyResponse {
        self.view.nav_key(key);
        KeyResponse {
            redraw: true,
            exit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureId;

    fn test_settings() -> Settings {
        let mut settings = Settings {
            display: Default::default(),
            sim: Default::default(),
        };
        settings.sim.obstacle_seed = Some(1);
        settings
    }

    fn test_textures() -> SceneTextures {
        SceneTextures {
            ground: TextureId(0),
            body: TextureId(1),
            support: TextureId(2),
            wheel: TextureId(3),
            drill: TextureId(4),
        }
    }

    #[test]
    fn idle_advances_scroll_and_obstacle() {
        let mut scene = SceneState::new(&test_settings());
        let x0 = scene.obstacle.x;
        scene.idle();
        scene.idle();
        assert!((scene.ground_scroll - 2.0 * GROUND_SCROLL_STEP).abs() < 1e-6);
        assert!(scene.obstacle.x < x0);
    }

    #[test]
    fn escape_requests_exit() {
        let mut scene = SceneState::new(&test_settings());
        let response = scene.key('\u{1b}');
        assert!(response.exit);
    }

    #[test]
    fn mode_key_cycles_and_redraws() {
        let mut scene = SceneState::new(&test_settings());
        let before = scene.view.mode;
        let response = scene.key('m');
        assert!(response.redraw);
        assert_ne!(scene.view.mode, before);
        scene.key('m');
        scene.key('m');
        assert_eq!(scene.view.mode, before);
    }

    #[test]
    fn unknown_keys_do_nothing() {
        let mut scene = SceneState::new(&test_settings());
        let response = scene.key('q');
        assert!(!response.redraw);
        assert!(!response.exit);
    }

    #[test]
    fn frame_contains_environment_and_rover() {
        let mut scene = SceneState::new(&test_settings());
        scene.light.azimuth_deg = 45.0; // daytime
        let mut frame = FrameGeometry::new();
        scene.emit(&mut frame, &test_textures());
        assert_eq!(frame.stats.wheels, 6);
        // body + camera head + rock
        assert_eq!(frame.stats.cuboids, 3);
        assert_eq!(frame.stats.cones, 0);
        assert!(frame.vertex_count() > 0);
        assert!(!frame.lines.is_empty());
    }

    #[test]
    fn night_frame_gets_the_beam() {
        let mut scene = SceneState::new(&test_settings());
        scene.light.azimuth_deg = 270.0; // light below the horizon
        let mut frame = FrameGeometry::new();
        scene.emit(&mut frame, &test_textures());
        assert_eq!(frame.stats.cones, 1);
        assert!(frame.spotlight.is_some());
    }
}
