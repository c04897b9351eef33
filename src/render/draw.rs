use egui_wgpu::ScreenDescriptor;
use wgpu::util::DeviceExt;

use crate::math::deg_to_rad;
use crate::render::camera::view_projection;
use crate::render::frame::FrameGeometry;
use crate::render::renderer::{GlobalsUniform, MaterialUniform, Renderer};
use crate::scene::state::SceneState;
use crate::texture::TextureRef;
use crate::texture::manager::SceneTextures;

impl Renderer {
    /// Recompute and store the view-projection matrix for the current
    /// window aspect. Called before the HUD runs so axis labels can project
    /// through the same matrix the frame is drawn with.
    pub fn update_view_proj(&mut self, scene: &SceneState) -> nalgebra_glm::Mat4 {
        let aspect = if self.config.height > 0 {
            self.config.width as f32 / self.config.height as f32
        } else {
            1.0
        };
        self.view_proj = view_projection(&scene.view, scene.dim, scene.fov_deg, aspect);
        self.view_proj
    }

    /// Draw one frame: the lit batches, the additive beam, the overlay
    /// lines, then the egui pass.
    pub fn render(
        &mut self,
        scene: &SceneState,
        frame: &FrameGeometry,
        textures: &SceneTextures,
        paint_jobs: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        screen_descriptor: ScreenDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        // Skip rendering while the window has no area (minimized, not ready)
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        let night = scene.is_night();
        let lighting = scene.view.lighting;

        // Below the horizon the light contributes nothing; the scene runs on
        // the spotlight alone.
        let (ambient, diffuse) = if night {
            (0.0, 0.0)
        } else {
            (
                0.01 * scene.light.ambient_pct as f32,
                0.01 * scene.light.diffuse_pct as f32,
            )
        };
        let light_pos = scene.light.position();
        let spot = frame.spotlight;

        let globals = GlobalsUniform {
            view_proj: self.view_proj.into(),
            light_pos: [
                light_pos.x,
                light_pos.y,
                light_pos.z,
                if lighting { 1.0 } else { 0.0 },
            ],
            ambient: [ambient, ambient, ambient, 1.0],
            diffuse: [diffuse, diffuse, diffuse, 1.0],
            spot_pos: match spot {
                Some(s) => [s.position.x, s.position.y, s.position.z, 1.0],
                None => [0.0, 0.0, 0.0, 0.0],
            },
            spot_dir: match spot {
                Some(s) => [
                    s.direction.x,
                    s.direction.y,
                    s.direction.z,
                    deg_to_rad(s.cutoff_deg).cos(),
                ],
                None => [0.0, -1.0, 0.0, 1.0],
            },
            params: [
                if scene.view.texture_replace { 1.0 } else { 0.0 },
                0.0,
                0.0,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        // The immediate-mode stream is rebuilt per frame, so vertex and
        // index buffers live for this frame only.
        let mut lit_draws = Vec::new();
        for batch in &frame.batches {
            if batch.mesh.is_empty() {
                continue;
            }
            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Batch Vertex Buffer"),
                    contents: bytemuck::cast_slice(&batch.mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Batch Index Buffer"),
                    contents: bytemuck::cast_slice(&batch.mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            let textured = batch.texture != TextureRef::Untextured;
            let material = self.create_material_bind_group(MaterialUniform::new(textured, false));
            let texture_index = batch.texture.resolve(textures).map(|id| id.0);
            lit_draws.push((
                vertex_buffer,
                index_buffer,
                batch.mesh.indices.len() as u32,
                material,
                texture_index,
            ));
        }

        let additive_draw = if frame.additive.is_empty() {
            None
        } else {
            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Additive Vertex Buffer"),
                    contents: bytemuck::cast_slice(&frame.additive.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Additive Index Buffer"),
                    contents: bytemuck::cast_slice(&frame.additive.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            let material = self.create_material_bind_group(MaterialUniform::new(false, true));
            Some((
                vertex_buffer,
                index_buffer,
                frame.additive.indices.len() as u32,
                material,
            ))
        };

        let line_draw = if frame.lines.is_empty() {
            None
        } else {
            let buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Line Vertex Buffer"),
                    contents: bytemuck::cast_slice(&frame.lines),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            Some((buffer, frame.lines.len() as u32))
        };

        let sky = if night {
            self.sky_night_color
        } else {
            self.sky_day_color
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: sky[0] as f64,
                            g: sky[1] as f64,
                            b: sky[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.lit_pipeline);
            render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (vertex_buffer, index_buffer, index_count, material, texture_index) in &lit_draws {
                let texture_bind_group = texture_index
                    .and_then(|i| self.texture_bind_groups.get(i))
                    .unwrap_or(&self.white_bind_group);
                render_pass.set_bind_group(1, texture_bind_group, &[]);
                render_pass.set_bind_group(2, material, &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..*index_count, 0, 0..1);
            }

            if let Some((vertex_buffer, index_buffer, index_count, material)) = &additive_draw {
                render_pass.set_pipeline(&self.additive_pipeline);
                render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
                render_pass.set_bind_group(1, &self.white_bind_group, &[]);
                render_pass.set_bind_group(2, material, &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..*index_count, 0, 0..1);
            }

            if let Some((buffer, count)) = &line_draw {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..*count, 0..1);
            }
        }

        // egui pass on top of the scene
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut egui_rpass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut egui_rpass, &paint_jobs, &screen_descriptor);
        }

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
