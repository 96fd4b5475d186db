// ReportBar - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and handles requests raised by them.

use crate::app::state::AppState;
use crate::ui;

/// The ReportBar application.
pub struct ReportBarApp {
    pub state: AppState,
}

impl ReportBarApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn open_pending(&mut self) {
        let Some(path) = self.state.pending_open.take() else {
            return;
        };
        if let Err(e) = self.state.open_request_log(&path) {
            tracing::error!(path = %path.display(), error = %e, "Failed to open request log");
            self.state.status_message = format!("Could not open request log: {e}");
            self.state.push_warning(e.to_string());
        }
    }
}

impl eframe::App for ReportBarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.open_pending();

        ctx.style_mut(|style| {
            for font_id in style.text_styles.values_mut() {
                if font_id.family == egui::FontFamily::Proportional {
                    font_id.size = self.state.ui_font_size;
                }
            }
        });
        ctx.set_visuals(if self.state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Request Log\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Request logs", &["jsonl", "ndjson", "json"])
                            .pick_file()
                        {
                            self.state.pending_open = Some(path);
                        }
                        ui.close_menu();
                    }
                    let can_reload = self.state.request_path.is_some();
                    if ui
                        .add_enabled(can_reload, egui::Button::new("Reload"))
                        .clicked()
                    {
                        self.state.pending_open = self.state.request_path.clone();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Filters", |ui| {
                    let has_filters = !self.state.report.filters().is_empty();
                    if ui
                        .add_enabled(has_filters, egui::Button::new("Clear Filters"))
                        .clicked()
                    {
                        self.state.clear_filters();
                        ui.close_menu();
                    }
                    let clause = self.state.where_clause();
                    if ui
                        .add_enabled(!clause.is_empty(), egui::Button::new("Copy WHERE Clause"))
                        .on_hover_text(if clause.is_empty() {
                            "No filters"
                        } else {
                            clause.as_str()
                        })
                        .clicked()
                    {
                        ctx.copy_text(clause.clone());
                        self.state.status_message =
                            "Copied WHERE clause to clipboard.".to_string();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.state.dark_mode, "Dark mode").changed() {
                        ui.close_menu();
                    }
                    if ui.button("Warnings").clicked() {
                        self.state.show_warnings = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Filter bar
        egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::filter_bar::render(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(ui::theme::STATUS_BG))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.state.status_message)
                            .color(ui::theme::STATUS_TEXT),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.state.debug_mode {
                            ui.label(
                                egui::RichText::new("DEBUG")
                                    .small()
                                    .color(ui::theme::WARNING_TEXT),
                            );
                        }
                        let total = self.state.records.len();
                        let filtered = self.state.filtered_indices.len();
                        if total > 0 {
                            ui.label(
                                egui::RichText::new(format!("{filtered}/{total} requests"))
                                    .color(ui::theme::STATUS_TEXT),
                            );
                        }
                        let warnings = self.state.warnings.len();
                        if warnings > 0
                            && ui
                                .link(
                                    egui::RichText::new(format!("\u{26a0} {warnings}"))
                                        .color(ui::theme::WARNING_TEXT),
                                )
                                .clicked()
                        {
                            self.state.show_warnings = true;
                        }
                    });
                });
            });

        // Detail pane (bottom)
        egui::TopBottomPanel::bottom("detail_pane")
            .resizable(true)
            .default_height(ui::theme::DETAIL_PANE_HEIGHT)
            .show(ctx, |ui| {
                ui::panels::detail::render(ui, &self.state);
            });

        // Central panel (request table)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::requests::render(ui, &mut self.state);
        });

        // Floating windows
        ui::panels::add_filter::render(ctx, &mut self.state);
        ui::panels::warnings::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }
}
