use nalgebra_glm as glm;

use crate::render::frame::FrameGeometry;
use crate::scene::obstacle::Obstacle;
use crate::texture::TextureRef;
use crate::texture::manager::SceneTextures;

const GROUND_Y: f32 = -0.01;
const GROUND_TILES: f32 = 8.0;
const MOUNTAIN_COLOR: [f32; 3] = [0.25, 0.2, 0.18];
const ROCK_COLOR: [f32; 3] = [0.45, 0.42, 0.4];

/// Hand-authored mountain silhouette: (x multiplier of dim, peak height).
const RIDGE: [(f32, f32); 11] = [
    (-1.0, 0.0),
    (-0.8, 38.0),
    (-0.6, 22.0),
    (-0.45, 55.0),
    (-0.25, 30.0),
    (0.0, 62.0),
    (0.2, 26.0),
    (0.45, 48.0),
    (0.65, 18.0),
    (0.85, 42.0),
    (1.0, 0.0),
];

/// Large textured ground quad plus an unseen back face. The texture's V
/// coordinate is offset by the ground scroll so the terrain appears to move
/// under a stationary rover.
pub fn ground(frame: &mut FrameGeometry, textures: &SceneTextures, dim: f32, scroll: f32) {
    let mut w = frame.lit(TextureRef::Handle(textures.ground));
    w.set_color(1.0, 1.0, 1.0);
    let up = glm::vec3(0.0, 1.0, 0.0);
    w.quad([
        (glm::vec3(-dim, GROUND_Y, -dim), up, [0.0, scroll]),
        (glm::vec3(-dim, GROUND_Y, dim), up, [0.0, GROUND_TILES + scroll]),
        (glm::vec3(dim, GROUND_Y, dim), up, [GROUND_TILES, GROUND_TILES + scroll]),
        (glm::vec3(dim, GROUND_Y, -dim), up, [GROUND_TILES, scroll]),
    ]);
    // Back face so the plane is closed when seen from below
    let down = glm::vec3(0.0, -1.0, 0.0);
    w.quad([
        (glm::vec3(-dim, GROUND_Y, -dim), down, [0.0, scroll]),
        (glm::vec3(dim, GROUND_Y, -dim), down, [GROUND_TILES, scroll]),
        (glm::vec3(dim, GROUND_Y, dim), down, [GROUND_TILES, GROUND_TILES + scroll]),
        (glm::vec3(-dim, GROUND_Y, dim), down, [0.0, GROUND_TILES + scroll]),
    ]);
}

/// Fixed silhouette ridge at constant depth, front and back faces.
pub fn mountains(frame: &mut FrameGeometry, dim: f32) {
    let z = -0.9 * dim;
    let mut w = frame.lit(TextureRef::Untextured);
    w.set_color(MOUNTAIN_COLOR[0], MOUNTAIN_COLOR[1], MOUNTAIN_COLOR[2]);
    for (normal_z, flip) in [(1.0, false), (-1.0, true)] {
        let normal = glm::vec3(0.0, 0.0, normal_z);
        for pair in RIDGE.windows(2) {
            let ((x0, h0), (x1, h1)) = (pair[0], pair[1]);
            let (x0, x1) = (x0 * dim, x1 * dim);
            let mut corners = [
                (glm::vec3(x0, 0.0, z), normal, [0.0, 0.0]),
                (glm::vec3(x1, 0.0, z), normal, [1.0, 0.0]),
                (glm::vec3(x1, h1, z), normal, [1.0, 1.0]),
                (glm::vec3(x0, h0, z), normal, [0.0, 1.0]),
            ];
            if flip {
                corners.reverse();
            }
            w.quad(corners);
        }
    }
}

/// The rolling rock, an untextured box at the obstacle's current position.
pub fn rock(frame: &mut FrameGeometry, obstacle: &Obstacle) {
    let half = obstacle.half_extent();
    frame.cuboid(
        TextureRef::Untextured,
        ROCK_COLOR,
        &glm::vec3(obstacle.x, obstacle.y, obstacle.z),
        &glm::vec3(half, half, half),
    );
}

/// Origin axis overlay; labels are drawn by the HUD at the returned points.
pub fn axes(frame: &mut FrameGeometry, dim: f32) {
    let len = dim * 0.7;
    let white = [1.0, 1.0, 1.0];
    let origin = glm::vec3(0.0, 0.0, 0.0);
    frame.line(origin, glm::vec3(len, 0.0, 0.0), white);
    frame.line(origin, glm::vec3(0.0, len, 0.0), white);
    frame.line(origin, glm::vec3(0.0, 0.0, len), white);
}

/// World-space positions of the axis labels.
pub fn axis_labels(dim: f32) -> [(glm::Vec3, &'static str); 3] {
    let len = dim * 0.7;
    [
        (glm::vec3(len, 0.0, 0.0), "X"),
        (glm::vec3(0.0, len, 0.0), "Y"),
        (glm::vec3(0.0, 0.0, len), "Z"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureId;

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
    fn ground_scroll_offsets_v_only() {
        let mut a = FrameGeometry::new();
        let mut b = FrameGeometry::new();
        ground(&mut a, &test_textures(), 150.0, 0.0);
        ground(&mut b, &test_textures(), 150.0, 2.5);
        let va = &a.batches[0].mesh.vertices;
        let vb = &b.batches[0].mesh.vertices;
        for (x, y) in va.iter().zip(vb.iter()) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.uv[0], y.uv[0]);
            assert!((y.uv[1] - x.uv[1] - 2.5).abs() < 1e-5);
        }
    }

    #[test]
    fn mountains_emit_front_and_back_faces() {
        let mut frame = FrameGeometry::new();
        mountains(&mut frame, 150.0);
        // 10 ridge segments, two faces, 4 vertices per quad
        assert_eq!(frame.batches[0].mesh.vertices.len(), 10 * 2 * 4);
    }

    #[test]
    fn axes_are_three_lines() {
        let mut frame = FrameGeometry::new();
        axes(&mut frame, 150.0);
        assert_eq!(frame.lines.len(), 6);
    }
}
