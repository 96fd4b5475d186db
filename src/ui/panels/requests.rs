// ReportBar - ui/panels/requests.rs
//
// Virtual-scrolling request table.
//
// Uses egui's `ScrollArea::show_rows`, which renders only the rows in the
// viewport, so drawing cost does not grow with the number of records.

use crate::app::state::AppState;
use crate::ui::theme;
use egui::text::{LayoutJob, TextFormat};

/// Render the request table (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let filtered = state.filtered_indices.len();

    if filtered == 0 {
        ui.centered_and_justified(|ui| {
            if state.records.is_empty() {
                ui.label("No requests loaded.\nOpen a request log via File \u{2192} Open Request Log.");
            } else {
                ui.label("No requests match the current filters.");
            }
        });
        return;
    }

    let row_height = theme::ROW_HEIGHT;
    let mut clicked_row: Option<usize> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(ui, row_height, filtered, |ui, row_range| {
            for display_idx in row_range {
                let Some(&record_idx) = state.filtered_indices.get(display_idx) else {
                    continue;
                };
                let Some(record) = state.records.get(record_idx) else {
                    continue;
                };

                let font = egui::FontId::monospace(12.0);
                let status = record.response.status_code;

                // Status badge keeps its class colour; the rest of the row
                // uses the high-contrast body colour.
                let mut job = LayoutJob::default();
                job.append(
                    &format!("{status:>3} "),
                    0.0,
                    TextFormat {
                        font_id: font.clone(),
                        color: theme::status_colour(status, state.dark_mode),
                        ..Default::default()
                    },
                );
                job.append(
                    &format!(
                        "{} | {:<6} | {} {}",
                        record.timestamp.format("%m-%d %H:%M:%S"),
                        record.request.method,
                        record.request.host,
                        record.request.path
                    ),
                    0.0,
                    TextFormat {
                        font_id: font,
                        color: theme::row_text_colour(state.dark_mode),
                        ..Default::default()
                    },
                );

                let is_selected = state.selected_record_index == Some(record_idx);
                let response = ui.selectable_label(is_selected, job);
                if response.clicked() {
                    clicked_row = Some(record_idx);
                }
                response.on_hover_text(record.timestamp.to_rfc3339());
            }
        });

    if let Some(row) = clicked_row {
        state.selected_record_index = Some(row);
    }
}
