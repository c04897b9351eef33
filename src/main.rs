use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod app;
mod error;
mod geometry;
mod hud;
mod math;
mod render;
mod rover;
mod scene;
mod settings;
mod texture;

struct AppHandler {
    app: Option<app::App>,
    texture_dir: PathBuf,
    startup_error: Option<error::RoverError>,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() && self.startup_error.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("RoverVis-RS - Planetary Rover Viewer")
                .with_inner_size(winit::dpi::LogicalSize::new(800.0, 800.0));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    self.startup_error = Some(e.into());
                    event_loop.exit();
                    return;
                }
            };

            match app::App::new(window, &self.texture_dir) {
                Ok(app) => self.app = Some(app),
                Err(e) => {
                    // Resource errors are fatal: stop the loop and let main
                    // report and exit
                    self.startup_error = Some(e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            app.tick();
            if let Err(e) = app.render() {
                // Surface errors are logged once per frame, never escalated
                log::error!("render error: {e:?}");
            }
            app.window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional texture directory as the only command line argument
    let texture_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("textures"));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler {
        app: None,
        texture_dir,
        startup_error: None,
    };

    event_loop.run_app(&mut handler)?;

    if let Some(e) = handler.startup_error {
        return Err(e.into());
    }

    Ok(())
}
