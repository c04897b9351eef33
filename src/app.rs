use std::path::Path;
use std::sync::Arc;

use egui_wgpu::ScreenDescriptor;
use winit::window::Window;

use crate::error::RoverError;
use crate::render::frame::FrameGeometry;
use crate::render::renderer::Renderer;
use crate::scene::state::SceneState;
use crate::scene::view::NavKey;
use crate::settings::Settings;
use crate::texture::manager::{SceneTextures, load_scene_textures};

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

/// Owns the whole viewer: scene simulation state, the render backend, the
/// loaded textures and the egui integration. One instance per window.
pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    scene: SceneState,
    textures: SceneTextures,
    egui_state: egui_winit::State,
}

impl App {
    pub fn new(window: Arc<Window>, texture_dir: &Path) -> Result<Self, RoverError> {
        let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

        let settings = Settings::load();
        // Write the sections back so a first run leaves editable config files
        settings.display.save();
        settings.sim.save();
        renderer.sky_day_color = settings.display.sky_day_color;
        renderer.sky_night_color = settings.display.sky_night_color;

        // Texture handles are acquired once, up front; any failure is fatal.
        let (images, textures) = load_scene_textures(texture_dir, renderer.max_texture_size())?;
        for image in &images {
            renderer.upload_texture(image);
        }

        let scene = SceneState::new(&settings);

        let egui_ctx = renderer.egui_context();
        let egui_state = egui_winit::State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        Ok(Self {
            window,
            renderer,
            scene,
            textures,
            egui_state,
        })
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        let egui_response = self.egui_state.on_window_event(&self.window, event);

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if event.state == winit::event::ElementState::Pressed {
                    return self.key_input(event);
                }
            }
            _ => {}
        }

        EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        }
    }

    /// Translate winit keys into the scene's ASCII/navigation handlers.
    fn key_input(&mut self, event: &winit::event::KeyEvent) -> EventResponse {
        use winit::keyboard::{Key, NamedKey};

        let response = match &event.logical_key {
            Key::Named(NamedKey::Escape) => self.scene.key('\u{1b}'),
            Key::Named(NamedKey::ArrowUp) => self.scene.special(NavKey::Up),
            Key::Named(NamedKey::ArrowDown) => self.scene.special(NavKey::Down),
            Key::Named(NamedKey::ArrowLeft) => self.scene.special(NavKey::Left),
            Key::Named(NamedKey::ArrowRight) => self.scene.special(NavKey::Right),
            Key::Character(text) => match text.chars().next() {
                Some(ch) => self.scene.key(ch),
                None => return EventResponse {
                    repaint: false,
                    exit: false,
                },
            },
            _ => {
                return EventResponse {
                    repaint: false,
                    exit: false,
                };
            }
        };

        EventResponse {
            repaint: response.redraw,
            exit: response.exit,
        }
    }

    /// One idle tick of the simulation clock.
    pub fn tick(&mut self) {
        self.scene.idle();
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // Build this frame's primitive stream
        let mut frame = FrameGeometry::new();
        self.scene.emit(&mut frame, &self.textures);

        // Projection first, so the HUD projects axis labels through the
        // same matrix the frame is drawn with
        let view_proj = self.renderer.update_view_proj(&self.scene);

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();
        let scene = &self.scene;
        let stats = frame.stats;
        let vertex_count = frame.vertex_count();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            crate::hud::draw(ctx, scene, &stats, vertex_count, &view_proj);
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [
                self.window.inner_size().width,
                self.window.inner_size().height,
            ],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        self.renderer.render(
            &self.scene,
            &frame,
            &self.textures,
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        )
    }
}
