// ReportBar - ui/panels/warnings.rs
//
// Warnings window: non-fatal problems from loading and filter changes.

use crate::app::state::AppState;

/// Render the warnings window (if `state.show_warnings` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_warnings {
        return;
    }

    let mut open = true;
    let mut clear = false;
    egui::Window::new(format!("Warnings ({})", state.warnings.len()))
        .open(&mut open)
        .default_width(520.0)
        .show(ctx, |ui| {
            if state.warnings.is_empty() {
                ui.label("No warnings.");
                return;
            }
            egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                for w in &state.warnings {
                    ui.label(egui::RichText::new(w).monospace().small());
                }
            });
            ui.separator();
            if ui.button("Clear").clicked() {
                clear = true;
            }
        });

    if clear {
        state.warnings.clear();
    }
    if !open {
        state.show_warnings = false;
    }
}
