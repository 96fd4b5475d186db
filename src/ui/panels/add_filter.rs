// ReportBar - ui/panels/add_filter.rs
//
// "Add Filter" popover: attribute select, comparison select, free-text
// value, Save and Cancel. Closing the window discards the draft.

use crate::app::state::AppState;
use crate::core::model::Compare;
use crate::ui::theme;

/// Render the add-filter window (if the composer has it open).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.composer.is_adder_open() {
        return;
    }

    let mut open = true;
    let mut save = false;
    let mut cancel = false;

    egui::Window::new("Add Filter")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(theme::ADD_FILTER_WIDTH)
        .show(ctx, |ui| {
            let current_key = state.composer.draft().key.clone();
            let mut chosen_key: Option<String> = None;
            egui::ComboBox::from_label("Attribute Filter")
                .selected_text(current_key.as_str())
                .show_ui(ui, |ui| {
                    for key in state.composer.attribute_keys() {
                        if ui
                            .selectable_label(*key == current_key, key.as_str())
                            .clicked()
                        {
                            chosen_key = Some(key.clone());
                        }
                    }
                });
            if let Some(key) = chosen_key {
                if let Err(e) = state.composer.set_draft_key(&key) {
                    tracing::warn!(error = %e, "Attribute rejected");
                }
            }

            let current_compare = state.composer.draft().compare;
            let mut compare = current_compare;
            egui::ComboBox::from_label("Comparison")
                .selected_text(compare.as_str())
                .show_ui(ui, |ui| {
                    for c in Compare::all() {
                        ui.selectable_value(&mut compare, *c, c.as_str());
                    }
                });
            if compare != current_compare {
                state.composer.set_draft_compare(compare);
            }

            ui.label("Value");
            ui.add(
                egui::TextEdit::singleline(state.composer.draft_value_mut())
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if save {
        state.save_draft();
    } else if cancel || !open {
        state.composer.cancel_draft();
    }
}
