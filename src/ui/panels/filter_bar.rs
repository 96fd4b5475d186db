// ReportBar - ui/panels/filter_bar.rs
//
// The report filter bar: date range with presets, product quick-filter
// menu, active filter chips, and the "Add filter" button.
//
// Clicks are collected into a `BarAction` and applied after the bar has
// been drawn, so no widget holds a borrow of the filter list while it is
// being changed.

use crate::app::state::AppState;
use crate::core::datepicker::{self, DatePreset};
use crate::core::model::{DateRange, FilterItem, ProductKey};
use crate::ui::theme;

enum BarAction {
    SelectProduct(Option<ProductKey>),
    RemoveChip(FilterItem),
    ApplyDates(DateRange),
    Preset(&'static DatePreset),
    OpenAdder,
}

/// Render the filter bar (top panel).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut action: Option<BarAction> = None;

    ui.horizontal_wrapped(|ui| {
        render_date_range(ui, state, &mut action);
        ui.separator();
        render_product_menu(ui, state, &mut action);
        render_chips(ui, state, &mut action);

        if ui
            .button("\u{2795} Add filter")
            .on_hover_text("Filter on a request attribute")
            .clicked()
        {
            action = Some(BarAction::OpenAdder);
        }
    });

    match action {
        Some(BarAction::SelectProduct(key)) => state.select_product(key),
        Some(BarAction::RemoveChip(filter)) => state.remove_chip(&filter),
        Some(BarAction::ApplyDates(range)) => state.change_date_range(range),
        Some(BarAction::Preset(preset)) => state.apply_preset(preset, chrono::Utc::now()),
        Some(BarAction::OpenAdder) => state.composer.open_adder(),
        None => {}
    }
}

fn render_date_range(ui: &mut egui::Ui, state: &mut AppState, action: &mut Option<BarAction>) {
    let range = state.report.date_range();
    let active = datepicker::active_preset(range, chrono::Utc::now());
    let preset_label = match active {
        Some(p) => p.text,
        None if range.is_unbounded() => "All time",
        None => "Custom",
    };

    egui::ComboBox::from_id_salt("date_preset")
        .selected_text(preset_label)
        .show_ui(ui, |ui| {
            for preset in datepicker::PRESETS {
                let is_active = active.is_some_and(|a| a == preset);
                if ui.selectable_label(is_active, preset.text).clicked() {
                    *action = Some(BarAction::Preset(preset));
                }
            }
        });

    ui.label("From");
    let from = ui.add(
        egui::TextEdit::singleline(&mut state.date_input.from)
            .hint_text("RFC 3339, empty = open")
            .desired_width(theme::DATE_FIELD_WIDTH),
    );
    ui.label("To");
    let to = ui.add(
        egui::TextEdit::singleline(&mut state.date_input.to)
            .hint_text("RFC 3339, empty = now")
            .desired_width(theme::DATE_FIELD_WIDTH),
    );

    let submitted = (from.lost_focus() || to.lost_focus())
        && ui.input(|i| i.key_pressed(egui::Key::Enter));
    let dirty = state.date_input != *state.report.date_range();
    if (ui.add_enabled(dirty, egui::Button::new("Apply")).clicked() || submitted) && dirty {
        *action = Some(BarAction::ApplyDates(state.date_input.clone()));
    }
}

fn render_product_menu(ui: &mut egui::Ui, state: &AppState, action: &mut Option<BarAction>) {
    let button_text = format!("{} \u{23f7}", state.composer.button_label());

    ui.menu_button(button_text, |ui| {
        for (i, entry) in state.composer.product_menu().iter().enumerate() {
            if i == 1 {
                ui.separator();
            }
            let text = match entry.product {
                Some(p) => format!("{}  {}", p.icon.glyph(), p.label),
                None => entry.label().to_string(),
            };
            let mut rich = egui::RichText::new(text);
            if entry.selected {
                rich = rich.strong();
            }

            let clicked = ui
                .vertical(|ui| {
                    let clicked = ui
                        .add_enabled(entry.enabled, egui::Button::new(rich).frame(false))
                        .clicked();
                    if !entry.description().is_empty() {
                        ui.label(egui::RichText::new(entry.description()).small().weak());
                    }
                    clicked
                })
                .inner;

            if clicked {
                *action = Some(BarAction::SelectProduct(entry.key().cloned()));
                ui.close_menu();
            }
        }
    });
}

fn render_chips(ui: &mut egui::Ui, state: &AppState, action: &mut Option<BarAction>) {
    let fill = theme::chip_fill(state.dark_mode);

    for filter in state.composer.visible_chips(state.report.filters()) {
        egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(filter.to_string()).small());
                if ui
                    .add(egui::Button::new("\u{2715}").small().frame(false))
                    .on_hover_text("Remove")
                    .clicked()
                {
                    *action = Some(BarAction::RemoveChip(filter.clone()));
                }
            });
        });
    }
}
