use nalgebra_glm as glm;

use crate::geometry::mesh::MeshWriter;

const SPOKE_COUNT: u32 = 6;

/// Emit a wheel at `center`: an outer rim ring `height` thick extruded along
/// the local Z axis, a concentric hub ring at a quarter of the radius, and 6
/// evenly spaced spokes connecting hub to rim at half height. Spokes are
/// thin quads rather than wide lines (the backend draws only 1px lines).
/// Purely decorative; no rolling simulation.
pub fn wheel(w: &mut MeshWriter, radius: f32, height: f32, center: &glm::Vec3, segments: u32) {
    w.push();
    w.translate(center);

    let step = 2.0 * std::f32::consts::PI / segments as f32;

    // Outer rim
    w.set_color(0.3, 0.3, 0.3);
    ring(w, radius, 0.0, height, step, segments);

    // Inner hub, offset along the depth axis
    w.set_color(0.5, 0.5, 0.5);
    ring(w, radius / 4.0, height / 1.5, height / 2.0, step, segments);

    // Spokes from hub to rim at half height
    let spoke_width = radius * 0.08;
    for i in 0..SPOKE_COUNT {
        let angle = i as f32 * (2.0 * std::f32::consts::PI / SPOKE_COUNT as f32);
        let dir = glm::vec3(angle.cos(), angle.sin(), 0.0);
        let side = glm::vec3(-angle.sin(), angle.cos(), 0.0) * (spoke_width / 2.0);
        let inner = dir * (radius / 4.0);
        let outer = dir * radius;
        let z = glm::vec3(0.0, 0.0, height / 2.0);
        let normal = glm::vec3(0.0, 0.0, 1.0);
        w.quad([
            (inner - side + z, normal, [0.0, 0.0]),
            (outer - side + z, normal, [1.0, 0.0]),
            (outer + side + z, normal, [1.0, 1.0]),
            (inner + side + z, normal, [0.0, 1.0]),
        ]);
    }

    w.pop();
}

/// One cylindrical band between depths `z0` and `z1` with radial normals.
fn ring(w: &mut MeshWriter, radius: f32, z0: f32, z1: f32, step: f32, segments: u32) {
    for i in 0..segments {
        let (t0, t1) = (i as f32 * step, (i + 1) as f32 * step);
        let (u0, u1) = (i as f32 / segments as f32, (i + 1) as f32 / segments as f32);
        let n0 = glm::vec3(t0.cos(), t0.sin(), 0.0);
        let n1 = glm::vec3(t1.cos(), t1.sin(), 0.0);
        w.quad([
            (n0 * radius + glm::vec3(0.0, 0.0, z0), n0, [u0, 0.0]),
            (n1 * radius + glm::vec3(0.0, 0.0, z0), n1, [u1, 0.0]),
            (n1 * radius + glm::vec3(0.0, 0.0, z1), n1, [u1, 1.0]),
            (n0 * radius + glm::vec3(0.0, 0.0, z1), n0, [u0, 1.0]),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::MeshBuffer;

    #[test]
    fn wheel_vertex_count_is_fixed_by_segments() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        wheel(&mut w, 4.0, 5.0, &glm::vec3(0.0, 0.0, 0.0), 12);
        // Two rings of `segments` quads plus 6 spoke quads, 4 vertices each.
        assert_eq!(buf.vertices.len(), (12 * 2 + 6) * 4);
    }

    #[test]
    fn wheel_is_positioned_at_center() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        let center = glm::vec3(-18.75, 4.5, 12.5);
        wheel(&mut w, 4.0, 5.0, &center, 36);
        for v in &buf.vertices {
            let dx = v.position[0] - center.x;
            let dy = v.position[1] - center.y;
            assert!((dx * dx + dy * dy).sqrt() <= 4.0 + 1e-4);
        }
    }
}
