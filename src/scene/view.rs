use nalgebra_glm as glm;

/// Camera/projection mode, cycled by one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Perspective,
    FirstPerson,
    Orthographic,
}

impl ViewMode {
    /// Modulo-3 rotation: three invocations return to the start.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Perspective => ViewMode::FirstPerson,
            ViewMode::FirstPerson => ViewMode::Orthographic,
            ViewMode::Orthographic => ViewMode::Perspective,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Perspective => "Perspective",
            ViewMode::FirstPerson => "First person",
            ViewMode::Orthographic => "Orthographic",
        }
    }
}

/// Navigation keys delivered by the event pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
}

/// Camera pose and interaction toggles. Mutated only from input handlers;
/// read by the projection step and (for day/night) the rover assembly.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Azimuth and elevation in degrees. Wrapped with a signed `% 360`, so
    /// negative values are possible.
    pub th: i32,
    pub ph: i32,
    pub mode: ViewMode,

    // First-person pose
    pub eye: glm::Vec3,
    pub center: glm::Vec3,
    pub up: glm::Vec3,
    /// Heading in radians
    pub heading: f32,
    pub move_speed: f32,
    pub rot_speed: f32,

    pub show_axes: bool,
    pub lighting: bool,
    pub spin: bool,
    /// Texture mode: false = modulate with lighting, true = replace.
    pub texture_replace: bool,
}

impl ViewState {
    pub fn new(show_axes: bool) -> Self {
        Self {
            th: 0,
            ph: 0,
            mode: ViewMode::Perspective,
            eye: glm::vec3(0.0, 2.0, 0.0),
            center: glm::vec3(0.0, 2.0, -1.0),
            up: glm::vec3(0.0, 1.0, 0.0),
            heading: 0.0,
            move_speed: 0.7,
            rot_speed: 0.2,
            show_axes,
            lighting: true,
            spin: true,
            texture_replace: false,
        }
    }

    pub fn toggle_view_mode(&mut self) {
        self.mode = self.mode.next();
    }

    pub fn toggle_axes(&mut self) {
        self.show_axes = !self.show_axes;
    }

    pub fn toggle_light(&mut self) {
        self.lighting = !self.lighting;
    }

    pub fn toggle_light_spin(&mut self) {
        self.spin = !self.spin;
    }

    pub fn toggle_texture_mode(&mut self) {
        self.texture_replace = !self.texture_replace;
    }

    pub fn reset_angles(&mut self) {
        self.th = 0;
        self.ph = 0;
    }

    pub fn adjust_angles(&mut self, t: i32, p: i32) {
        self.th = (self.th + t) % 360;
        self.ph = (self.ph + p) % 360;
    }

    /// Recompute the look-target as eye plus the unit heading vector.
    fn refresh_center(&mut self) {
        self.center.x = self.eye.x + self.heading.sin();
        self.center.z = self.eye.z - self.heading.cos();
    }

    /// Move the eye along the heading; `dir` is +1 forward, -1 back.
    pub fn walk(&mut self, dir: f32) {
        self.eye.x += dir * self.move_speed * self.heading.sin();
        self.eye.z -= dir * self.move_speed * self.heading.cos();
        self.refresh_center();
    }

    /// Rotate the heading; `dir` is +1 right, -1 left.
    pub fn turn(&mut self, dir: f32) {
        self.heading += dir * self.rot_speed;
        self.refresh_center();
    }

    /// Move eye and look-target Y in lockstep; `dir` is +1 up, -1 down.
    pub fn elevate(&mut self, dir: f32) {
        self.eye.y += dir * self.move_speed;
        self.center.y += dir * self.move_speed;
    }

    /// One navigation key: first-person walks/turns, the other modes adjust
    /// the view angles in 5 degree steps. Always requests a redraw.
    pub fn nav_key(&mut self, key: NavKey) {
        if self.mode == ViewMode::FirstPerson {
            match key {
                NavKey::Up => self.walk(1.0),
                NavKey::Down => self.walk(-1.0),
                NavKey::Left => self.turn(-1.0),
                NavKey::Right => self.turn(1.0),
            }
        } else {
            match key {
                NavKey::Up => self.adjust_angles(0, 5),
                NavKey::Down => self.adjust_angles(0, -5),
                NavKey::Left => self.adjust_angles(5, 0),
                NavKey::Right => self.adjust_angles(-5, 0),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_cycling_is_modulo_three() {
        for start in [
            ViewMode::Perspective,
            ViewMode::FirstPerson,
            ViewMode::Orthographic,
        ] {
            assert_eq!(start.next().next().next(), start);
        }
        assert_eq!(ViewMode::Orthographic.next(), ViewMode::Perspective);
    }

    #[test]
    fn angle_wrap_keeps_signed_modulo() {
        let mut view = ViewState::new(true);
        view.adjust_angles(-5, 0);
        assert_eq!(view.th, -5);
        view.th = 355;
        view.adjust_angles(10, 0);
        assert_eq!(view.th, 5);
        view.ph = -355;
        view.adjust_angles(0, -10);
        assert_eq!(view.ph, -5);
    }

    #[test]
    fn look_target_is_eye_plus_unit_heading() {
        let mut view = ViewState::new(true);
        view.mode = ViewMode::FirstPerson;
        view.nav_key(NavKey::Right);
        view.nav_key(NavKey::Up);
        let dx = view.center.x - view.eye.x;
        let dz = view.center.z - view.eye.z;
        assert!(((dx * dx + dz * dz).sqrt() - 1.0).abs() < 1e-5);
        assert!((dx - view.heading.sin()).abs() < 1e-5);
        assert!((dz + view.heading.cos()).abs() < 1e-5);
    }

    #[test]
    fn walking_moves_along_heading() {
        let mut view = ViewState::new(true);
        view.mode = ViewMode::FirstPerson;
        view.nav_key(NavKey::Up);
        // heading 0 looks down -Z
        assert!((view.eye.z + view.move_speed).abs() < 1e-5);
        assert_eq!(view.eye.x, 0.0);
    }

    #[test]
    fn elevation_moves_eye_and_center_in_lockstep() {
        let mut view = ViewState::new(true);
        let before = (view.eye.y, view.center.y);
        view.elevate(1.0);
        assert!((view.eye.y - before.0 - view.move_speed).abs() < 1e-6);
        assert!((view.center.y - before.1 - view.move_speed).abs() < 1e-6);
    }
}
