use nalgebra_glm as glm;

use crate::geometry::mesh::MeshWriter;
use crate::math::{Segment, alignment_rotation};

pub const DEFAULT_SEGMENTS: u32 = 36;

/// Emit a capped cylinder whose base sits at `segment.start` and which
/// extends along the segment. The side is a ring of quads with U sweeping
/// 0..1 around the circumference and V running 0 at the base cap to 1 at the
/// top cap; two triangle fans close the ends.
///
/// A zero-length segment emits nothing.
pub fn strut(w: &mut MeshWriter, radius: f32, segment: &Segment, segments: u32) {
    let length = segment.length();
    if length == 0.0 {
        return;
    }
    let rotation = alignment_rotation(segment);

    w.push();
    w.translate(&segment.start);
    if rotation.angle_deg != 0.0 {
        w.rotate_deg(rotation.angle_deg, &rotation.axis);
    }

    let step = 2.0 * std::f32::consts::PI / segments as f32;

    // Side surface
    for i in 0..segments {
        let (t0, t1) = (i as f32 * step, (i + 1) as f32 * step);
        let (u0, u1) = (i as f32 / segments as f32, (i + 1) as f32 / segments as f32);
        let (x0, z0) = (t0.cos(), t0.sin());
        let (x1, z1) = (t1.cos(), t1.sin());
        w.quad([
            (
                glm::vec3(radius * x0, 0.0, radius * z0),
                glm::vec3(x0, 0.0, z0),
                [u0, 0.0],
            ),
            (
                glm::vec3(radius * x1, 0.0, radius * z1),
                glm::vec3(x1, 0.0, z1),
                [u1, 0.0],
            ),
            (
                glm::vec3(radius * x1, length, radius * z1),
                glm::vec3(x1, 0.0, z1),
                [u1, 1.0],
            ),
            (
                glm::vec3(radius * x0, length, radius * z0),
                glm::vec3(x0, 0.0, z0),
                [u0, 1.0],
            ),
        ]);
    }

    // Caps as triangle fans
    for (y, ny) in [(0.0, -1.0), (length, 1.0)] {
        let normal = glm::vec3(0.0, ny, 0.0);
        let center = w.vertex(glm::vec3(0.0, y, 0.0), normal, [0.5, 0.5]);
        let mut prev = None;
        for i in 0..=segments {
            let t = i as f32 * step;
            let (x, z) = (t.cos(), t.sin());
            let rim = w.vertex(
                glm::vec3(radius * x, y, radius * z),
                normal,
                [0.5 + 0.5 * x, 0.5 + 0.5 * z],
            );
            if let Some(p) = prev {
                if ny > 0.0 {
                    w.triangle(center, p, rim);
                } else {
                    w.triangle(center, rim, p);
                }
            }
            prev = Some(rim);
        }
    }

    w.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::MeshBuffer;

    #[test]
    fn zero_length_segment_emits_no_geometry() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        let seg = Segment::new(glm::vec3(1.0, 2.0, 3.0), glm::vec3(1.0, 2.0, 3.0));
        strut(&mut w, 2.0, &seg, DEFAULT_SEGMENTS);
        assert_eq!(buf.vertices.len(), 0);
        assert_eq!(buf.indices.len(), 0);
    }

    #[test]
    fn vertical_strut_spans_segment_length() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        let seg = Segment::new(glm::vec3(0.0, 0.0, 0.0), glm::vec3(0.0, 7.0, 0.0));
        strut(&mut w, 1.0, &seg, 8);
        assert!(!buf.is_empty());
        let ys: Vec<f32> = buf.vertices.iter().map(|v| v.position[1]).collect();
        let min = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((min - 0.0).abs() < 1e-5);
        assert!((max - 7.0).abs() < 1e-5);
    }

    #[test]
    fn oriented_strut_ends_at_segment_end() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        let seg = Segment::new(glm::vec3(1.0, 1.0, 1.0), glm::vec3(4.0, 5.0, 1.0));
        strut(&mut w, 0.5, &seg, 12);
        // Some vertex must coincide with the top cap center at segment.end.
        let hit = buf.vertices.iter().any(|v| {
            let d = [
                v.position[0] - 4.0,
                v.position[1] - 5.0,
                v.position[2] - 1.0,
            ];
            (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt() < 1e-3
        });
        assert!(hit, "no vertex at the oriented strut's end point");
    }
}
