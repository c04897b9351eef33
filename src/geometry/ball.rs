use nalgebra_glm as glm;

use crate::geometry::mesh::MeshWriter;
use crate::math::deg_to_rad;

pub const DEFAULT_LAT_STEP_DEG: u32 = 10;

/// One point on the unit sphere in degree polar coordinates. For a sphere at
/// the origin the position and normal vectors are the same.
fn polar(th_deg: f32, ph_deg: f32) -> glm::Vec3 {
    let (th, ph) = (deg_to_rad(th_deg), deg_to_rad(ph_deg));
    glm::vec3(th.sin() * ph.cos(), ph.sin(), th.cos() * ph.cos())
}

/// Emit a UV sphere at `center` built from latitude bands of quads running
/// -90..+90 with longitude swept 0..360.
pub fn ball(w: &mut MeshWriter, center: &glm::Vec3, radius: f32, lat_step_deg: u32) {
    w.push();
    w.translate(center);

    let inc = lat_step_deg as i32;
    let lon_step = 2 * inc;
    let mut ph = -90;
    while ph < 90 {
        let mut th = 0;
        while th < 360 {
            let corners = [
                (th, ph),
                (th + lon_step, ph),
                (th + lon_step, ph + inc),
                (th, ph + inc),
            ];
            let quad = corners.map(|(t, p)| {
                let unit = polar(t as f32, p as f32);
                (
                    unit * radius,
                    unit,
                    [t as f32 / 360.0, (p as f32 + 90.0) / 180.0],
                )
            });
            w.quad(quad);
            th += lon_step;
        }
        ph += inc;
    }

    w.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::MeshBuffer;

    #[test]
    fn normals_are_unit_position_vectors() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        ball(&mut w, &glm::vec3(0.0, 0.0, 0.0), 3.0, 30);
        for v in &buf.vertices {
            let n = glm::vec3(v.normal[0], v.normal[1], v.normal[2]);
            assert!((glm::length(&n) - 1.0).abs() < 1e-4);
            let p = glm::vec3(v.position[0], v.position[1], v.position[2]);
            assert!(glm::length(&(p - n * 3.0)) < 1e-3);
        }
    }

    #[test]
    fn band_count_follows_lat_step() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        ball(&mut w, &glm::vec3(0.0, 0.0, 0.0), 1.0, 10);
        // 18 latitude bands, 18 longitude quads each (20 degree sweep).
        assert_eq!(buf.vertices.len(), 18 * 18 * 4);
    }
}
