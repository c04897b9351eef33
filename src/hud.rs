use nalgebra_glm as glm;

use crate::render::frame::FrameStats;
use crate::scene::environment::axis_labels;
use crate::scene::state::SceneState;

/// On-screen text: the corner HUD plus the projected axis labels. Everything
/// here is read-only over the scene; all text goes through egui.
pub fn draw(
    ctx: &egui::Context,
    scene: &SceneState,
    stats: &FrameStats,
    vertex_count: usize,
    view_proj: &glm::Mat4,
) {
    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
        .show(ctx, |ui| {
            ui.label(format!("Angle={},{}", scene.view.th, scene.view.ph));
            ui.label(format!("View Mode (m): {}", scene.view.mode.label()));
            ui.label(format!(
                "Texture Mode (t): {}",
                if scene.view.texture_replace {
                    "Replace"
                } else {
                    "Modulate"
                }
            ));
            ui.label(format!(
                "Lighting (l): {}  Spin (k): {}  [{}]",
                if scene.view.lighting { "On" } else { "Off" },
                if scene.view.spin { "On" } else { "Off" },
                if scene.is_night() { "Night" } else { "Day" },
            ));
            ui.label(format!(
                "Parts: {} struts, {} wheels, {} boxes / {} vertices",
                stats.struts, stats.wheels, stats.cuboids, vertex_count
            ));
        });

    if scene.view.show_axes {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("axis-labels"),
        ));
        let screen = ctx.screen_rect();
        for (point, label) in axis_labels(scene.dim) {
            let clip = view_proj * glm::vec4(point.x, point.y, point.z, 1.0);
            if clip.w <= 0.0 {
                continue;
            }
            let ndc = glm::vec2(clip.x / clip.w, clip.y / clip.w);
            if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
                continue;
            }
            let pos = egui::pos2(
                screen.left() + (ndc.x + 1.0) / 2.0 * screen.width(),
                screen.top() + (1.0 - ndc.y) / 2.0 * screen.height(),
            );
            painter.text(
                pos,
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(14.0),
                egui::Color32::WHITE,
            );
        }
    }
}
