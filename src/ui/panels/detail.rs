// ReportBar - ui/panels/detail.rs
//
// Detail pane for the selected request.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the detail pane (bottom panel).
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let Some(record) = state.selected_record() else {
        ui.centered_and_justified(|ui| {
            ui.label("Select a request to view details.");
        });
        return;
    };

    egui::Grid::new("detail_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Timestamp:");
            ui.label(record.timestamp.to_rfc3339());
            ui.end_row();

            ui.label("Status:");
            ui.label(
                egui::RichText::new(record.response.status_code.to_string())
                    .color(theme::status_colour(record.response.status_code, state.dark_mode))
                    .strong(),
            );
            ui.end_row();

            ui.label("Method:");
            ui.label(&record.request.method);
            ui.end_row();

            ui.label("Host:");
            ui.label(&record.request.host);
            ui.end_row();

            ui.label("Path:");
            ui.label(egui::RichText::new(&record.request.path).monospace());
            ui.end_row();

            if let Some(ms) = record.response.duration_ms {
                ui.label("Duration:");
                ui.label(format!("{ms} ms"));
                ui.end_row();
            }

            if let Some(ref agent) = record.request.user_agent {
                ui.label("User agent:");
                ui.label(agent);
                ui.end_row();
            }
        });
}
