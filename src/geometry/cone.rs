use nalgebra_glm as glm;

use crate::geometry::mesh::MeshWriter;
use crate::math::{Segment, alignment_rotation, deg_to_rad};

/// Emit a spotlight beam: a triangle fan from `apex` to a circular base of
/// radius `length * tan(half_angle)` centered `length` along `axis`. The
/// caller routes this into the additive batch so the beam reads as emissive
/// regardless of scene lighting; the alpha here keeps the add subtle.
pub fn spotlight_cone(
    w: &mut MeshWriter,
    apex: &glm::Vec3,
    axis: &glm::Vec3,
    half_angle_deg: f32,
    length: f32,
    segments: u32,
) {
    if length == 0.0 || glm::length(axis) == 0.0 {
        return;
    }
    let base_radius = length * deg_to_rad(half_angle_deg).tan();

    // Reuse the strut alignment: build the cone along local +Y, then rotate
    // that frame onto the axis direction.
    let rotation = alignment_rotation(&Segment::new(*apex, *apex + glm::normalize(axis)));

    w.push();
    w.translate(apex);
    if rotation.angle_deg != 0.0 {
        w.rotate_deg(rotation.angle_deg, &rotation.axis);
    }

    let step = 2.0 * std::f32::consts::PI / segments as f32;
    let tip_normal = glm::vec3(0.0, 1.0, 0.0);
    let tip = w.vertex(glm::vec3(0.0, 0.0, 0.0), tip_normal, [0.5, 0.0]);
    let mut prev = None;
    for i in 0..=segments {
        let t = i as f32 * step;
        let (x, z) = (t.cos(), t.sin());
        let rim = w.vertex(
            glm::vec3(base_radius * x, length, base_radius * z),
            glm::vec3(x, 0.0, z),
            [i as f32 / segments as f32, 1.0],
        );
        if let Some(p) = prev {
            w.triangle(tip, p, rim);
        }
        prev = Some(rim);
    }

    w.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::MeshBuffer;

    #[test]
    fn base_radius_follows_half_angle() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        spotlight_cone(
            &mut w,
            &glm::vec3(0.0, 0.0, 0.0),
            &glm::vec3(0.0, -1.0, 0.0),
            45.0,
            10.0,
            8,
        );
        // With a 45 degree half angle the base radius equals the length.
        let max_r = buf
            .vertices
            .iter()
            .map(|v| (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt())
            .fold(0.0f32, f32::max);
        assert!((max_r - 10.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_cone_emits_nothing() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        spotlight_cone(
            &mut w,
            &glm::vec3(1.0, 1.0, 1.0),
            &glm::vec3(0.0, 0.0, 0.0),
            12.0,
            10.0,
            8,
        );
        assert!(buf.is_empty());
    }
}
