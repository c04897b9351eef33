use nalgebra_glm as glm;

use crate::geometry::ball::ball;
use crate::geometry::cone::spotlight_cone;
use crate::geometry::cuboid::cuboid;
use crate::geometry::mesh::{LineVertex, MeshBuffer, MeshWriter};
use crate::geometry::strut::strut;
use crate::geometry::wheel::wheel;
use crate::math::Segment;
use crate::texture::TextureRef;

/// A positional spotlight attached to the rover's camera lens at night.
#[derive(Debug, Clone, Copy)]
pub struct Spotlight {
    pub position: glm::Vec3,
    pub direction: glm::Vec3,
    pub cutoff_deg: f32,
}

/// Per-part tallies, kept so the HUD can report what the frame contains and
/// so the fixed part inventory is checkable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub struts: usize,
    pub wheels: usize,
    pub cuboids: usize,
    pub balls: usize,
    pub cones: usize,
    pub power_packs: usize,
}

/// One lit draw batch: all geometry sharing a texture binding.
pub struct DrawBatch {
    pub texture: TextureRef,
    pub mesh: MeshBuffer,
}

/// The full primitive stream for one frame. Builders append world-space
/// records here; the wgpu adapter consumes it without knowing how any part
/// was generated. Rebuilt from scratch every frame — there is no retained
/// scene graph.
#[derive(Default)]
pub struct FrameGeometry {
    pub batches: Vec<DrawBatch>,
    /// Emissive geometry drawn with additive blending and lighting off.
    pub additive: MeshBuffer,
    pub lines: Vec<LineVertex>,
    pub spotlight: Option<Spotlight>,
    pub stats: FrameStats,
}

impl FrameGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer into the lit batch for `texture`, creating the batch on first
    /// use.
    pub fn lit(&mut self, texture: TextureRef) -> MeshWriter<'_> {
        let index = match self.batches.iter().position(|b| b.texture == texture) {
            Some(i) => i,
            None => {
                self.batches.push(DrawBatch {
                    texture,
                    mesh: MeshBuffer::default(),
                });
                self.batches.len() - 1
            }
        };
        MeshWriter::new(&mut self.batches[index].mesh)
    }

    pub fn strut(&mut self, texture: TextureRef, radius: f32, segment: &Segment, segments: u32) {
        self.stats.struts += 1;
        let mut w = self.lit(texture);
        w.set_color(0.54, 0.47, 0.3);
        strut(&mut w, radius, segment, segments);
    }

    pub fn wheel(
        &mut self,
        texture: TextureRef,
        radius: f32,
        height: f32,
        center: &glm::Vec3,
        segments: u32,
    ) {
        self.stats.wheels += 1;
        let mut w = self.lit(texture);
        wheel(&mut w, radius, height, center, segments);
    }

    pub fn cuboid(
        &mut self,
        texture: TextureRef,
        color: [f32; 3],
        center: &glm::Vec3,
        half: &glm::Vec3,
    ) {
        self.stats.cuboids += 1;
        let mut w = self.lit(texture);
        w.set_color(color[0], color[1], color[2]);
        cuboid(&mut w, center, half);
    }

    pub fn ball(&mut self, color: [f32; 3], center: &glm::Vec3, radius: f32, lat_step_deg: u32) {
        self.stats.balls += 1;
        let mut w = self.lit(TextureRef::Untextured);
        w.set_color(color[0], color[1], color[2]);
        ball(&mut w, center, radius, lat_step_deg);
    }

    pub fn cone(
        &mut self,
        apex: &glm::Vec3,
        axis: &glm::Vec3,
        half_angle_deg: f32,
        length: f32,
        segments: u32,
    ) {
        self.stats.cones += 1;
        let mut w = MeshWriter::new(&mut self.additive);
        w.set_color_alpha(1.0, 0.95, 0.75, 0.35);
        spotlight_cone(&mut w, apex, axis, half_angle_deg, length, segments);
    }

    pub fn line(&mut self, from: glm::Vec3, to: glm::Vec3, color: [f32; 3]) {
        self.lines.push(LineVertex {
            position: [from.x, from.y, from.z],
            color,
        });
        self.lines.push(LineVertex {
            position: [to.x, to.y, to.z],
            color,
        });
    }

    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.mesh.vertices.len()).sum::<usize>()
            + self.additive.vertices.len()
            + self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureId;

    #[test]
    fn batches_are_keyed_by_texture() {
        let mut frame = FrameGeometry::new();
        let seg = Segment::new(glm::vec3(0.0, 0.0, 0.0), glm::vec3(0.0, 5.0, 0.0));
        frame.strut(TextureRef::Default, 1.0, &seg, 8);
        frame.strut(TextureRef::Default, 1.0, &seg, 8);
        frame.strut(TextureRef::Handle(TextureId(3)), 1.0, &seg, 8);
        assert_eq!(frame.batches.len(), 2);
        assert_eq!(frame.stats.struts, 3);
    }

    #[test]
    fn degenerate_strut_counts_but_emits_nothing() {
        // The guard lives in the builder; the tally still records the call.
        let mut frame = FrameGeometry::new();
        let seg = Segment::new(glm::vec3(1.0, 1.0, 1.0), glm::vec3(1.0, 1.0, 1.0));
        frame.strut(TextureRef::Untextured, 1.0, &seg, 8);
        assert_eq!(frame.vertex_count(), 0);
    }
}
