use nalgebra_glm as glm;

use crate::math::deg_to_rad;

/// One record of the primitive stream handed to the render backend.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Triangle soup for one draw batch.
#[derive(Debug, Default)]
pub struct MeshBuffer {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshBuffer {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Append-only writer over a [`MeshBuffer`] with a push/pop matrix stack,
/// mirroring the transform model of the rendering surface so part builders
/// can be written as translate/rotate/emit sequences without touching any
/// graphics API.
pub struct MeshWriter<'a> {
    buffer: &'a mut MeshBuffer,
    stack: Vec<glm::Mat4>,
    color: [f32; 4],
}

impl<'a> MeshWriter<'a> {
    pub fn new(buffer: &'a mut MeshBuffer) -> Self {
        Self {
            buffer,
            stack: vec![glm::Mat4::identity()],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    fn top(&self) -> &glm::Mat4 {
        self.stack.last().expect("matrix stack is never empty")
    }

    pub fn push(&mut self) {
        self.stack.push(*self.top());
    }

    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn translate(&mut self, offset: &glm::Vec3) {
        let m = glm::translate(self.top(), offset);
        *self.stack.last_mut().unwrap() = m;
    }

    pub fn rotate_deg(&mut self, angle_deg: f32, axis: &glm::Vec3) {
        let m = glm::rotate(self.top(), deg_to_rad(angle_deg), axis);
        *self.stack.last_mut().unwrap() = m;
    }

    pub fn scale(&mut self, factors: &glm::Vec3) {
        let m = glm::scale(self.top(), factors);
        *self.stack.last_mut().unwrap() = m;
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.color = [r, g, b, 1.0];
    }

    pub fn set_color_alpha(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.color = [r, g, b, a];
    }

    /// Transform and append one vertex, returning its index.
    pub fn vertex(&mut self, position: glm::Vec3, normal: glm::Vec3, uv: [f32; 2]) -> u16 {
        let m = self.top();
        let p = m * glm::vec4(position.x, position.y, position.z, 1.0);
        let n = m * glm::vec4(normal.x, normal.y, normal.z, 0.0);
        let n = glm::vec3(n.x, n.y, n.z);
        let len = glm::length(&n);
        let n = if len > 0.0 { n / len } else { n };
        let index = self.buffer.vertices.len() as u16;
        self.buffer.vertices.push(Vertex {
            position: [p.x, p.y, p.z],
            normal: [n.x, n.y, n.z],
            uv,
            color: self.color,
        });
        index
    }

    pub fn triangle(&mut self, a: u16, b: u16, c: u16) {
        self.buffer.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append a quad given counter-clockwise corners; emitted as two
    /// triangles.
    pub fn quad(&mut self, corners: [(glm::Vec3, glm::Vec3, [f32; 2]); 4]) {
        let i: Vec<u16> = corners
            .into_iter()
            .map(|(p, n, uv)| self.vertex(p, n, uv))
            .collect();
        self.triangle(i[0], i[1], i[2]);
        self.triangle(i[0], i[2], i[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_emits_two_triangles() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        let n = glm::vec3(0.0, 0.0, 1.0);
        w.quad([
            (glm::vec3(0.0, 0.0, 0.0), n, [0.0, 0.0]),
            (glm::vec3(1.0, 0.0, 0.0), n, [1.0, 0.0]),
            (glm::vec3(1.0, 1.0, 0.0), n, [1.0, 1.0]),
            (glm::vec3(0.0, 1.0, 0.0), n, [0.0, 1.0]),
        ]);
        assert_eq!(buf.vertices.len(), 4);
        assert_eq!(buf.indices.len(), 6);
    }

    #[test]
    fn translate_applies_to_vertices_and_pop_restores() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        w.push();
        w.translate(&glm::vec3(10.0, 0.0, 0.0));
        w.vertex(glm::vec3(1.0, 2.0, 3.0), glm::vec3(0.0, 1.0, 0.0), [0.0, 0.0]);
        w.pop();
        w.vertex(glm::vec3(1.0, 2.0, 3.0), glm::vec3(0.0, 1.0, 0.0), [0.0, 0.0]);
        assert_eq!(buf.vertices[0].position, [11.0, 2.0, 3.0]);
        assert_eq!(buf.vertices[1].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn rotation_keeps_normals_unit_length() {
        let mut buf = MeshBuffer::default();
        let mut w = MeshWriter::new(&mut buf);
        w.rotate_deg(37.0, &glm::vec3(0.0, 0.0, 1.0));
        w.vertex(glm::vec3(1.0, 0.0, 0.0), glm::vec3(1.0, 0.0, 0.0), [0.0, 0.0]);
        let n = buf.vertices[0].normal;
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }
}
