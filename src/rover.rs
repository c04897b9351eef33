use nalgebra_glm as glm;

use crate::geometry::ball::DEFAULT_LAT_STEP_DEG;
use crate::geometry::strut::DEFAULT_SEGMENTS;
use crate::math::Segment;
use crate::render::frame::{FrameGeometry, Spotlight};
use crate::texture::TextureRef;
use crate::texture::manager::SceneTextures;

const BODY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const HEAD_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
const LENS_COLOR: [f32; 3] = [0.1, 0.1, 0.12];
const PACK_COLOR: [f32; 3] = [0.8, 0.78, 0.72];

const SPOT_CUTOFF_DEG: f32 = 12.0;

/// The rover's proportions. Every sub-part position and dimension is a
/// multiple of these two numbers, so the whole model rescales coherently.
#[derive(Debug, Clone, Copy)]
pub struct Rover {
    pub size: f32,
    pub body_height: f32,
}

impl Default for Rover {
    fn default() -> Self {
        Self {
            size: 25.0,
            body_height: 15.0,
        }
    }
}

impl Rover {
    pub fn new(size: f32, body_height: f32) -> Self {
        Self { size, body_height }
    }

    /// Emit the whole rover into `frame`. Immediate-mode: called every
    /// frame, nothing is retained between calls.
    pub fn emit(&self, frame: &mut FrameGeometry, textures: &SceneTextures, night: bool) {
        self.body(frame, textures);
        self.supports(frame, textures);
        self.wheels(frame, textures);
        self.camera_mast(frame, textures, night);
        self.power_pack(frame);
        self.drill_arm(frame, textures);
    }

    fn body(&self, frame: &mut FrameGeometry, textures: &SceneTextures) {
        let (s, h) = (self.size, self.body_height);
        frame.cuboid(
            TextureRef::Handle(textures.body),
            BODY_COLOR,
            &glm::vec3(0.0, h, 0.0),
            &glm::vec3(0.75 * s, 0.25 * s, 0.4 * s),
        );
    }

    /// Two mirrored 4-segment leg assemblies zig-zagging from the body's
    /// underside to a mid-height knee.
    fn supports(&self, frame: &mut FrameGeometry, textures: &SceneTextures) {
        let (s, h) = (self.size, self.body_height);
        let thick = 0.052 * s;
        let thin = 0.032 * s;
        let tex = TextureRef::Handle(textures.support);

        for z in [0.5 * s, -0.5 * s] {
            let joints = [
                glm::vec3(-0.75 * s, 0.68 * h, z),
                glm::vec3(-0.30 * s, 0.68 * h, z),
                glm::vec3(0.22 * s, h, z),
                glm::vec3(0.75 * s, 0.68 * h, z),
            ];
            for pair in joints.windows(2) {
                frame.strut(tex, thick, &Segment::new(pair[0], pair[1]), DEFAULT_SEGMENTS);
            }
            // Knee strut down toward the wheel line
            frame.strut(
                tex,
                thin,
                &Segment::new(
                    glm::vec3(-0.30 * s, 0.68 * h, z),
                    glm::vec3(0.05 * s, 0.40 * h, z),
                ),
                DEFAULT_SEGMENTS,
            );
        }
    }

    fn wheels(&self, frame: &mut FrameGeometry, textures: &SceneTextures) {
        let (s, h) = (self.size, self.body_height);
        let radius = 0.16 * s;
        let height = 0.2 * s;
        let tex = TextureRef::Handle(textures.wheel);

        for x in [-0.75 * s, 0.05 * s, 0.75 * s] {
            for z in [0.5 * s, -0.7 * s] {
                frame.wheel(
                    tex,
                    radius,
                    height,
                    &glm::vec3(x, 0.3 * h, z),
                    DEFAULT_SEGMENTS,
                );
            }
        }
    }

    /// Camera arm, head and lens. At night the lens carries a positional
    /// spotlight and an additive beam cone; by day neither exists.
    fn camera_mast(&self, frame: &mut FrameGeometry, textures: &SceneTextures, night: bool) {
        let (s, h) = (self.size, self.body_height);
        let arm_top = glm::vec3(0.62 * s, 2.2 * h, 0.27 * s);
        frame.strut(
            TextureRef::Default,
            0.032 * s,
            &Segment::new(glm::vec3(0.62 * s, h + 0.4 * h, 0.27 * s), arm_top),
            DEFAULT_SEGMENTS,
        );

        let head_edge = 0.4 * s;
        let head_center = arm_top + glm::vec3(0.0, head_edge / 2.0, 0.0);
        frame.cuboid(
            TextureRef::Handle(textures.body),
            HEAD_COLOR,
            &head_center,
            &glm::vec3(head_edge / 2.0, head_edge / 2.0, head_edge / 2.0),
        );

        let lens_center = head_center + glm::vec3(head_edge / 2.0, 0.0, 0.0);
        frame.ball(LENS_COLOR, &lens_center, 0.08 * s, DEFAULT_LAT_STEP_DEG);

        if night {
            // Fixed outward beam direction, slightly down onto the ground
            let beam = glm::normalize(&glm::vec3(1.0, -0.25, 0.0));
            frame.spotlight = Some(Spotlight {
                position: lens_center,
                direction: beam,
                cutoff_deg: SPOT_CUTOFF_DEG,
            });
            frame.cone(&lens_center, &beam, SPOT_CUTOFF_DEG, 1.2 * s, DEFAULT_SEGMENTS);
        }
    }

    /// Rear power pack: a flared trapezoid, wider at the top, hand-built
    /// from non-uniform quads on the body's -X face.
    fn power_pack(&self, frame: &mut FrameGeometry) {
        let (s, h) = (self.size, self.body_height);
        frame.stats.power_packs += 1;

        let y0 = h - 0.20 * s;
        let y1 = h + 0.25 * s;
        // bottom rectangle
        let b = [
            glm::vec3(-0.75 * s, y0, -0.25 * s),
            glm::vec3(-1.00 * s, y0, -0.25 * s),
            glm::vec3(-1.00 * s, y0, 0.25 * s),
            glm::vec3(-0.75 * s, y0, 0.25 * s),
        ];
        // flared top rectangle
        let t = [
            glm::vec3(-0.75 * s, y1, -0.35 * s),
            glm::vec3(-1.10 * s, y1, -0.35 * s),
            glm::vec3(-1.10 * s, y1, 0.35 * s),
            glm::vec3(-0.75 * s, y1, 0.35 * s),
        ];

        let mut w = frame.lit(TextureRef::Untextured);
        w.set_color(PACK_COLOR[0], PACK_COLOR[1], PACK_COLOR[2]);
        sloped_quad(&mut w, [b[1], b[2], t[2], t[1]]); // outer face
        sloped_quad(&mut w, [b[0], b[1], t[1], t[0]]); // -Z side
        sloped_quad(&mut w, [b[3], t[3], t[2], b[2]]); // +Z side
        sloped_quad(&mut w, [t[0], t[1], t[2], t[3]]); // top
        sloped_quad(&mut w, [b[0], b[3], b[2], b[1]]); // bottom
    }

    /// Drill arm: a 2-segment reach from the body, a thicker vertical
    /// housing, the bit, and two flanking guide struts.
    fn drill_arm(&self, frame: &mut FrameGeometry, textures: &SceneTextures) {
        let (s, h) = (self.size, self.body_height);
        let tex = TextureRef::Handle(textures.drill);
        let z = -0.27 * s;

        let shoulder = glm::vec3(0.50 * s, 0.75 * h, z);
        let elbow = glm::vec3(0.90 * s, 0.60 * h, z);
        let mount = glm::vec3(1.05 * s, 0.50 * h, z);
        frame.strut(tex, 0.04 * s, &Segment::new(shoulder, elbow), DEFAULT_SEGMENTS);
        frame.strut(tex, 0.04 * s, &Segment::new(elbow, mount), DEFAULT_SEGMENTS);

        // Housing hangs from the mount point
        frame.strut(
            tex,
            0.06 * s,
            &Segment::new(
                glm::vec3(1.05 * s, 0.60 * h, z),
                glm::vec3(1.05 * s, 0.25 * h, z),
            ),
            DEFAULT_SEGMENTS,
        );
        // Bit
        frame.strut(
            tex,
            0.015 * s,
            &Segment::new(
                glm::vec3(1.05 * s, 0.25 * h, z),
                glm::vec3(1.05 * s, 0.05 * h, z),
            ),
            DEFAULT_SEGMENTS,
        );
        // Guides flank the bit
        for dz in [-0.04 * s, 0.04 * s] {
            frame.strut(
                tex,
                0.01 * s,
                &Segment::new(
                    glm::vec3(1.05 * s, 0.45 * h, z + dz),
                    glm::vec3(1.05 * s, 0.15 * h, z + dz),
                ),
                DEFAULT_SEGMENTS,
            );
        }
    }
}

/// Quad with its normal derived from the winding, for the hand-specified
/// power pack faces.
fn sloped_quad(w: &mut crate::geometry::mesh::MeshWriter<'_>, corners: [glm::Vec3; 4]) {
    let e1 = corners[1] - corners[0];
    let e2 = corners[3] - corners[0];
    let n = glm::cross(&e1, &e2);
    let len = glm::length(&n);
    let n = if len > 0.0 { n / len } else { glm::vec3(0.0, 1.0, 0.0) };
    w.quad([
        (corners[0], n, [0.0, 0.0]),
        (corners[1], n, [1.0, 0.0]),
        (corners[2], n, [1.0, 1.0]),
        (corners[3], n, [0.0, 1.0]),
    ]);
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
    fn part_inventory_is_fixed() {
        let rover = Rover::new(25.0, 15.0);
        let mut frame = FrameGeometry::new();
        rover.emit(&mut frame, &test_textures(), false);

        assert_eq!(frame.stats.wheels, 6);
        // 2 leg chains of 4 + camera arm + drill arm 2 + housing + bit + 2 guides
        assert_eq!(frame.stats.struts, 15);
        // body + camera head
        assert_eq!(frame.stats.cuboids, 2);
        assert_eq!(frame.stats.balls, 1);
        assert_eq!(frame.stats.power_packs, 1);
        assert_eq!(frame.stats.cones, 0);
    }

    #[test]
    fn night_adds_spotlight_and_cone() {
        let rover = Rover::default();
        let mut frame = FrameGeometry::new();
        rover.emit(&mut frame, &test_textures(), true);

        assert_eq!(frame.stats.cones, 1);
        let spot = frame.spotlight.expect("night frame carries a spotlight");
        assert!(spot.position.y > rover.body_height);
        assert!((glm::length(&spot.direction) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn inventory_is_independent_of_pose() {
        let small = Rover::new(10.0, 6.0);
        let large = Rover::new(80.0, 40.0);
        let mut f1 = FrameGeometry::new();
        let mut f2 = FrameGeometry::new();
        small.emit(&mut f1, &test_textures(), false);
        large.emit(&mut f2, &test_textures(), false);
        assert_eq!(f1.stats, f2.stats);
    }
}
