use nalgebra_glm as glm;

use crate::math::deg_to_rad;
use crate::scene::view::{ViewMode, ViewState};

/// Build the combined view-projection matrix for the current view mode.
///
/// Perspective orbits the origin at twice the world dimension; first person
/// looks from the walked eye pose; orthographic applies the elevation and
/// azimuth as plain rotations inside a `dim`-sized box.
pub fn view_projection(view: &ViewState, dim: f32, fov_deg: f32, aspect: f32) -> glm::Mat4 {
    let proj = match view.mode {
        ViewMode::Perspective | ViewMode::FirstPerson => {
            glm::perspective(aspect, deg_to_rad(fov_deg), dim / 4.0, 4.0 * dim)
        }
        ViewMode::Orthographic => glm::ortho(-aspect * dim, aspect * dim, -dim, dim, -dim, dim),
    };

    let view_matrix = match view.mode {
        ViewMode::Perspective => {
            let th = deg_to_rad(view.th as f32);
            let ph = deg_to_rad(view.ph as f32);
            let eye = glm::vec3(
                -2.0 * dim * th.sin() * ph.cos(),
                2.0 * dim * ph.sin(),
                2.0 * dim * th.cos() * ph.cos(),
            );
            // The up vector tracks the elevation so the orbit flips past
            // the poles.
            glm::look_at(&eye, &glm::vec3(0.0, 0.0, 0.0), &glm::vec3(0.0, ph.cos(), 0.0))
        }
        ViewMode::FirstPerson => glm::look_at(&view.eye, &view.center, &view.up),
        ViewMode::Orthographic => {
            glm::rotation(deg_to_rad(view.ph as f32), &glm::vec3(1.0, 0.0, 0.0))
                * glm::rotation(deg_to_rad(view.th as f32), &glm::vec3(0.0, 1.0, 0.0))
        }
    };

    proj * view_matrix
}
