use nalgebra_glm as glm;

use crate::geometry::mesh::MeshWriter;

/// Emit a rectangular prism centered at `center` with the given half
/// extents. Each face carries an outward normal and its own 0..1 UV square.
pub fn cuboid(w: &mut MeshWriter, center: &glm::Vec3, half: &glm::Vec3) {
    let (cx, cy, cz) = (center.x, center.y, center.z);
    let (hx, hy, hz) = (half.x, half.y, half.z);

    // Front (+Z)
    face(
        w,
        glm::vec3(0.0, 0.0, 1.0),
        [
            glm::vec3(cx - hx, cy - hy, cz + hz),
            glm::vec3(cx + hx, cy - hy, cz + hz),
            glm::vec3(cx + hx, cy + hy, cz + hz),
            glm::vec3(cx - hx, cy + hy, cz + hz),
        ],
    );
    // Back (-Z)
    face(
        w,
        glm::vec3(0.0, 0.0, -1.0),
        [
            glm::vec3(cx + hx, cy - hy, cz - hz),
            glm::vec3(cx - hx, cy - hy, cz - hz),
            glm::vec3(cx - hx, cy + hy, cz - hz),
            glm::vec3(cx + hx, cy + hy, cz - hz),
        ],
    );
    // Left (-X)
    face(
        w,
        glm::vec3(-1.0, 0.0, 0.0),
        [
            glm::vec3(cx - hx, cy - hy, cz - hz),
            glm::vec3(cx - hx, cy - hy, cz + hz),
            glm::vec3(cx - hx, cy + hy, cz + hz),
            glm::vec3(cx - hx, cy + hy, cz - hz),
        ],
    );
    // Right (+X)
    face(
        w,
        glm::vec3(1.0, 0.0, 0.0),
        [
            glm::vec3(cx + hx, cy - hy, cz + hz),
            glm::vec3(cx + hx, cy - hy, cz - hz),
            glm::vec3(cx + hx, cy + hy, cz - hz),
            glm::vec3(cx + hx, cy + hy, cz + hz),
        ],
    );
    // Top (+Y)
    face(
        w,
        glm::vec3(0.0, 1.0, 0.0),
        [
            glm::vec3(cx - hx, cy + hy, cz + hz),
            glm::vec3(cx + hx, cy + hy, cz + hz),
            glm::vec3(cx + hx, cy + hy, cz - hz),
            glm::vec3(cx - hx, cy + hy, cz - hz),
        ],
    );
    // Bottom (-Y)
    face(
        w,
        glm::vec3(0.0, -1.0, 0.0),
        [
            glm::vec3(cx - hx, cy - hy, cz - hz),
            glm::vec3(cx + hx, cy - hy, cz - hz),
            glm::vec3(cx + hx, cy - hy, cz + hz),
            glm::vec3(cx - hx, cy - hy, cz + hz),
        ],
    );
}

fn face(w: &mut MeshWriter, normal: glm::Vec3, corners: [glm::Vec3; 4]) {
    w.quad([
        (corners[0], normal, [0.0, 0.0]),
        (corners[1], normal, [1.0, 0.0]),
        (corners[2], normal, [1.0, 1.0]),
        (corners[3], normal, [0.0, 1.0]),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::MeshBuffer;

    #[test]
    fn six_faces_four_vertices_each() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        cuboid(
            &mut w,
            &glm::vec3(0.0, 15.0, 0.0),
            &glm::vec3(18.75, 6.25, 10.0),
        );
        assert_eq!(buf.vertices.len(), 24);
        assert_eq!(buf.indices.len(), 36);
    }

    #[test]
    fn normals_point_away_from_center() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        let center = glm::vec3(3.0, -2.0, 1.0);
        cuboid(&mut w, &center, &glm::vec3(1.0, 2.0, 3.0));
        for v in &buf.vertices {
            let out = glm::vec3(
                v.position[0] - center.x,
                v.position[1] - center.y,
                v.position[2] - center.z,
            );
            let n = glm::vec3(v.normal[0], v.normal[1], v.normal[2]);
            assert!(glm::dot(&out, &n) > 0.0);
        }
    }
}
